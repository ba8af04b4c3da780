use std::collections::HashMap;
use std::sync::LazyLock;

/// Canonical name and the lowercase spellings that refer to it
const BOOKS: &[(&str, &[&str])] = &[
    // Old Testament
    ("GENÈSE", &["genèse", "genese", "génèse", "génese"]),
    ("EXODE", &["exode"]),
    ("LÉVITIQUE", &["lévitique", "levitique"]),
    ("NOMBRES", &["nombres", "nombre"]),
    ("DEUTÉRONOME", &["deutéronome", "deuteronome"]),
    ("JOSUÉ", &["josué", "josue"]),
    ("JUGES", &["juges", "juge"]),
    ("RUTH", &["ruth"]),
    ("ESDRAS", &["esdras"]),
    ("NÉHÉMIE", &["néhémie", "nehemie"]),
    ("ESTHER", &["esther"]),
    ("JOB", &["job"]),
    ("PSAUMES", &["psaumes", "psaume"]),
    ("PROVERBES", &["proverbes", "proverbe"]),
    ("ECCLÉSIASTE", &["ecclésiaste", "ecclesiaste"]),
    (
        "CANTIQUE DES CANTIQUES",
        &["cantique des cantiques", "cantique", "cantiques"],
    ),
    ("ÉSAÏE", &["ésaïe", "esaie", "esaïe", "ésaie", "isaïe", "isaie"]),
    ("JÉRÉMIE", &["jérémie", "jeremie"]),
    ("LAMENTATIONS", &["lamentations", "lamentation"]),
    ("ÉZÉCHIEL", &["ézéchiel", "ezechiel", "ezéchiel"]),
    ("DANIEL", &["daniel"]),
    ("OSÉE", &["osée", "osee"]),
    ("JOËL", &["joël", "joel"]),
    ("AMOS", &["amos"]),
    ("ABDIAS", &["abdias"]),
    ("JONAS", &["jonas"]),
    ("MICHÉE", &["michée", "michee"]),
    ("NAHUM", &["nahum"]),
    ("HABACUC", &["habacuc", "habakuk", "habakkuk"]),
    ("SOPHONIE", &["sophonie"]),
    ("AGGÉE", &["aggée", "aggee"]),
    ("ZACHARIE", &["zacharie"]),
    ("MALACHIE", &["malachie"]),
    // New Testament
    ("MATTHIEU", &["matthieu", "mathieu"]),
    ("MARC", &["marc"]),
    ("LUC", &["luc"]),
    ("JEAN", &["jean"]),
    (
        "ACTES",
        &["actes", "acte", "actes des apôtres", "actes des apotres"],
    ),
    ("ROMAINS", &["romains", "romain"]),
    ("GALATES", &["galates", "galate"]),
    ("ÉPHÉSIENS", &["éphésiens", "ephesiens", "éphésien", "ephesien"]),
    ("PHILIPPIENS", &["philippiens", "philippien"]),
    ("COLOSSIENS", &["colossiens", "colossien"]),
    ("TITE", &["tite"]),
    ("PHILÉMON", &["philémon", "philemon"]),
    ("HÉBREUX", &["hébreux", "hebreux", "hébreu", "hebreu"]),
    ("JACQUES", &["jacques"]),
    ("JUDE", &["jude"]),
    ("APOCALYPSE", &["apocalypse", "révélation", "revelation"]),
];

/// Books split into numbered volumes, with the highest volume number
const NUMBERED_BOOKS: &[(&str, &[&str], u32)] = &[
    ("SAMUEL", &["samuel"], 2),
    ("ROIS", &["rois"], 2),
    ("CHRONIQUES", &["chroniques", "chronique"], 2),
    ("CORINTHIENS", &["corinthiens", "corinthien"], 2),
    ("THESSALONICIENS", &["thessaloniciens", "thessalonicien"], 2),
    ("TIMOTHÉE", &["timothée", "timothee"], 2),
    ("PIERRE", &["pierre"], 2),
    ("JEAN", &["jean"], 3),
];

/// Spoken and written prefixes for volumes 1 to 3
const VOLUME_PREFIXES: [&[&str]; 3] = [
    &["1", "un", "une", "premier", "première", "premiere", "1er", "1re"],
    &["2", "deux", "deuxième", "deuxieme", "second", "seconde", "2e"],
    &["3", "trois", "troisième", "troisieme", "3e"],
];

static BOOK_NAMES: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    let mut names = HashMap::new();

    for (canonical, variants) in BOOKS {
        for variant in *variants {
            names.insert(variant.to_string(), canonical.to_string());
        }
    }

    for (canonical, variants, volumes) in NUMBERED_BOOKS {
        for variant in *variants {
            names.entry(variant.to_string()).or_insert_with(|| canonical.to_string());
        }
        for volume in 1..=*volumes {
            let prefixes = VOLUME_PREFIXES[(volume - 1) as usize];
            for prefix in prefixes {
                for variant in *variants {
                    names.insert(format!("{} {}", prefix, variant), format!("{} {}", volume, canonical));
                }
            }
        }
    }

    names
});

/// Canonical uppercase name for a book spelling, case-insensitive.
///
/// Accepts volume prefixes (`deuxième corinthiens`, `1 jean`) and
/// irregular plurals (`psaume`).
pub fn lookup_book(name: &str) -> Option<&'static str> {
    let key = name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    BOOK_NAMES
        .get(&key)
        .or_else(|| BOOK_NAMES.get(&format!("{}s", key)))
        .map(String::as_str)
}

/// Canonical name for a numbered volume such as `2 CORINTHIENS`
pub fn lookup_volume(volume: u32, name: &str) -> Option<&'static str> {
    lookup_book(&format!("{} {}", volume, name.trim()))
}
