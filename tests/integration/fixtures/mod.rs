// Fixture document: three pages with a running header and a stamped footer,
// plus hand-tagged annotations of its sentences in CoNLL-U form

/// Page text as `pdftotext` would write it, pages separated by form feeds
pub const PAGE_TEXT: &str = "EL CAMINO\nLa niña se sentó junto al río. Miraba el agua\nEditorial Sol 1 de 3\n\u{000C}\
EL CAMINO\ncorrer entre las piedras. -¿Vienes? -preguntó su hermano.\nEditorial Sol 2 de 3\n\u{000C}\
EL CAMINO\nNo contestó. Se fue al pueblo.\nEditorial Sol 3 de 3\n\u{000C}";

/// Sentences expected after cleaning and the dialogue pass
pub const EXPECTED_SENTENCES: &[&str] = &[
    "La niña se sentó junto al río",
    "Miraba el agua correr entre las piedras",
    "\"Vienes \"preguntó su hermano",
    "No contestó",
    "Se fue al pueblo",
];

pub const KNOWN_WORDS: &str = "el\nla\nlas\nse\nno\na\nal\nsu\nentre\njunto\n";

pub const PROPER_NOUNS: &str = "Sol\n";

pub const MAPPINGS: &str = "fue: ir\n";

/// (id, form, lemma, upos) rows per sentence
const SENTENCES: &[&[(&str, &str, &str, &str)]] = &[
    &[
        ("1", "La", "el", "DET"),
        ("2", "niña", "niña", "NOUN"),
        ("3", "se", "él", "PRON"),
        ("4", "sentó", "sentar", "VERB"),
        ("5", "junto", "junto", "ADV"),
        ("6-7", "al", "_", "_"),
        ("6", "a", "a", "ADP"),
        ("7", "el", "el", "DET"),
        ("8", "río", "río", "NOUN"),
    ],
    &[
        ("1", "Miraba", "mirar", "VERB"),
        ("2", "el", "el", "DET"),
        ("3", "agua", "agua", "NOUN"),
        ("4", "correr", "correr", "VERB"),
        ("5", "entre", "entre", "ADP"),
        ("6", "las", "el", "DET"),
        ("7", "piedras", "piedra", "NOUN"),
    ],
    &[
        ("1", "\"", "\"", "PUNCT"),
        ("2", "Vienes", "venir", "VERB"),
        ("3", "\"", "\"", "PUNCT"),
        ("4", "preguntó", "preguntar", "VERB"),
        ("5", "su", "su", "DET"),
        ("6", "hermano", "hermano", "NOUN"),
    ],
    &[
        ("1", "No", "no", "ADV"),
        ("2", "contestó", "contestar", "VERB"),
    ],
    &[
        ("1", "Se", "él", "PRON"),
        ("2", "fue", "fue", "VERB"),
        ("3-4", "al", "_", "_"),
        ("3", "a", "a", "ADP"),
        ("4", "el", "el", "DET"),
        ("5", "pueblo", "pueblo", "NOUN"),
    ],
    &[
        ("1", "Traduce", "traduc", "VERB"),
        ("2", "el", "el", "DET"),
        ("3", "libro", "libro", "NOUN"),
    ],
    &[
        ("1", "Quiere", "querer", "VERB"),
        ("2", "alegrar", "alegrar se", "VERB"),
        ("3", "se", "él", "PRON"),
    ],
];

/// Render the tagged sentences as CoNLL-U
pub fn conllu_document() -> String {
    let mut out = String::new();
    for (index, sentence) in SENTENCES.iter().enumerate() {
        out.push_str(&format!("# sent_id = {}\n", index + 1));
        for (id, form, lemma, upos) in sentence.iter() {
            out.push_str(&format!("{id}\t{form}\t{lemma}\t{upos}\t_\t_\t0\tdep\t_\t_\n"));
        }
        out.push('\n');
    }
    out
}

/// Unknown words expected from the fixture, in rank order
pub const EXPECTED_WORDS: &[&str] = &["agua", "hermano", "libro", "niña", "piedras", "pueblo", "río"];

/// Verbs expected from the fixture, in rank order
pub const EXPECTED_VERBS: &[&str] = &[
    "alegrarse", "contestar", "correr", "ir", "mirar", "preguntar", "querer", "sentar", "venir",
];
