//! Regex families recognising the pieces of an AIP airspace description.

use once_cell::sync::Lazy;
use regex::Regex;

/// Coordinate pair, optionally in brackets marking the closing point of a box.
const NE: &str = r"(?P<ne>\(?(?P<n>[\d\.]{5,10})\s?N(?: N)?[\s-]*(?P<e>[\d\.]+)[E\)]+)";
const NE2: &str = r"(?P<ne2>\(?(?P<n2>\d+)N\s*(?P<e2>\d+)E\)?)";
const EMBEDDED_CIRCLE: &str =
    r"A circle(?: with|,) radius (?P<rad>[\d\.]+) NM cente?red on (?P<cn>\d+)N\s+(?P<ce>\d+)E";
const MONTH: &str = r"(?:JAN|FEB|MAR|APR|MAI|JUN|JUL|AUG|SEP|OCT|NOV|DEC)";

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

pub static NAME: Lazy<Regex> = Lazy::new(|| {
    regex(concat!(
        r"^\s*(?P<name>[^\s]* ((Centre|West|North|South|East| Norway) )?",
        r"(TRIDENT|ADS|HTZ|AOR|RMZ|ATZ|FAB|TMA|TIA|TIA/RMZ|CTA|CTR|CTR,|TIZ|FIR|OCEANIC FIR|CTR/TIZ|TIZ/RMZ|RMZ/TMZ)",
        r"( (West|Centre|[a-z]))?|[^\s]*( ACC sector| ACC Oslo|ESTRA|EUCBA|RPAS).*)",
        r"( cont.)?\s*($|\s{5}|.*FIR)"
    ))
});
pub static NAME_CODE: Lazy<Regex> = Lazy::new(|| regex(r"^\s*(?P<name>E[NS] [RD].*)\s*$"));
pub static NAME_COMPACT_CODE: Lazy<Regex> = Lazy::new(|| regex(r"^\s*(?P<name>E[NS]D\d.*)\s*$"));
pub static NAME_NORWEGIAN: Lazy<Regex> =
    Lazy::new(|| regex(r"Navn og utstrekning /\s+(?P<name>.*)$"));
pub static NAME_SECTOR: Lazy<Regex> = Lazy::new(|| regex(r"^(?P<name>Sector .*)$"));
pub static NAME_ACC: Lazy<Regex> = Lazy::new(|| regex(r"^(?P<name>Norway ACC .*)$"));
pub static NAME_AREA: Lazy<Regex> =
    Lazy::new(|| regex(r"^Area Name: \((?P<name>EN .*)\) (?P<name_cont>.*)$"));
pub static NAME_MISC: Lazy<Regex> = Lazy::new(|| regex(r"^(?P<name>Hareid .*)$"));

/// Name grammars in the order they are tried.
pub static NAMES: Lazy<[&'static Regex; 8]> = Lazy::new(|| {
    [
        &*NAME,
        &*NAME_CODE,
        &*NAME_COMPACT_CODE,
        &*NAME_NORWEGIAN,
        &*NAME_SECTOR,
        &*NAME_ACC,
        &*NAME_AREA,
        &*NAME_MISC,
    ]
});

pub static CLASS: Lazy<Regex> = Lazy::new(|| regex(r"Class:? (?P<class>.)"));
pub static CLASS_STANDALONE: Lazy<Regex> = Lazy::new(|| regex(r"^(?P<class>[CDG])$"));

pub static CIRCLE: Lazy<Regex> = Lazy::new(|| {
    regex(&format!(
        r"(?:{NE} - )?(?:\d\. )?(?:A circle(?: with|,)? r|R)adius (?:(?P<rad>[\d\.,]+) NM|(?P<rad_m>\d+) m)(?: \([\d\.,]+ k?m\))?(?: cente?red on (?P<cn>\d+)N\s+(?P<ce>\d+)E)?"
    ))
});

pub static SECTOR: Lazy<Regex> = Lazy::new(|| {
    regex(&format!(
        r"(?:{NE} - )?(?:(?:\d\. )?A s|S)ector (?P<secfrom>\d{{1,3}})° - (?P<secto>\d{{1,3}})° \(T\), radius (?:(?P<radfrom>[\d\.,]+) - )?(?P<rad>[\d\.,]+) NM"
    ))
});

/// Tokens of a Norwegian coordinate list.
pub static COORDINATES_NO: Lazy<Regex> = Lazy::new(|| {
    regex(&format!(
        r"{NE}|(?P<along>along)|(?P<arc>(?:counter)?clockwise)|(?:\d+)N|(?:\d+)E|{EMBEDDED_CIRCLE}"
    ))
});

/// Tokens of a Swedish coordinate list, where circles may wrap onto the next line.
pub static COORDINATES_SE: Lazy<Regex> = Lazy::new(|| {
    regex(&format!(
        r"{NE}|(?P<along>border)|(?P<arc>(?:counter)?clockwise)|(?:\d+)N|(?:\d+)E|{EMBEDDED_CIRCLE}|(?P<circle>A circle)|(?:radius)"
    ))
});

pub static ARC: Lazy<Regex> = Lazy::new(|| {
    regex(&format!(
        r"(?P<dir>(?:counter)?clockwise) along an arc (?:of (?P<rad1>[\d\.,]+) NM radius )?centred on {NE}(?:(?: and)?(?: with)?(?: radius) (?P<rad2>[ \d\.,]+) NM(?: \([\d\.]+ k?m\))?)? (?:- ){NE2}"
    ))
});

pub static UPPER_LIMIT: Lazy<Regex> = Lazy::new(|| {
    regex(r"Upper limit:\s+(?:FL\s+(?P<flto>\d+)|(?P<ftamsl>\d+)\s+FT\s+(?:AMSL)?)")
});
pub static LOWER_LIMIT: Lazy<Regex> = Lazy::new(|| {
    regex(r"ower limit:\s+(?:FL\s+(?P<flfrom>\d+)|(?P<ftamsl>\d+)\s+FT\s+(?:AMSL|SFC)|(?P<msl>MSL))")
});
pub static LIMIT_RANGE: Lazy<Regex> = Lazy::new(|| {
    regex(r"(?P<from>GND|\d{3,6}) (?:(?:til/)?to|-) (?P<to>UNL|\d{3,6})(?: [Ff][Tt] AMSL)?")
});
pub static LIMIT_SINGLE: Lazy<Regex> = Lazy::new(|| {
    regex(r"(?P<ftamsl>\d+)\s?[Ff][Tt] (?:A?MSL|GND)|(?P<gnd>GND)|(?P<unl>UNL)|FL\s?(?P<fl>\d+)|(?P<rmk>See (?:remark|RMK))")
});

pub static PERIOD_FROM: Lazy<Regex> = Lazy::new(|| {
    regex(&format!(
        r"Active from (?P<pfrom>\d+ {MONTH}) (?P<ptimefrom>\d+)"
    ))
});
pub static PERIOD_UNTIL: Lazy<Regex> = Lazy::new(|| {
    regex(&format!(
        r"Active until (?P<pto>\d+ {MONTH}) (?P<ptimeto>\d+)"
    ))
});
pub static PERIOD_ESTABLISHED: Lazy<Regex> = Lazy::new(|| {
    regex(&format!(
        r"Established for (?P<pfrom>\d+ {MONTH}) - (?P<pto>\d+ {MONTH})"
    ))
});

pub static FREQUENCY: Lazy<Regex> = Lazy::new(|| regex(r"(?P<freq>\d+\.\d+ MHZ)"));
