//! Whimsical "adjective-ly adjective animal" phrases.

use std::time::{SystemTime, UNIX_EPOCH};

/// Turned into adverbs with a trailing "ly".
pub const FIRST_ADJECTIVES: &[&str] = &[
    "Abaft", "Abandoned", "Abased", "Abashed", "Abasic", "Abbatial", "Abdicable", "Abdicant",
    "Abdicative", "Abdominal", "Abdominous", "Abducent", "Aberrant", "Aberrational", "Abeyant",
    "Abhorrent", "Abiotic", "Ablaze", "Able", "Ablebodied", "Ablutophobic", "Abnormal",
    "Abolitionary", "Abominable", "Aboriginal", "Above", "Aboveground", "Abrupt", "Absent",
    "Absentminded", "Absolute", "Absolutistic", "Abstract", "Abstracted", "Absurd", "Abusive",
    "Abysmal", "Abyssal",
];

pub const SECOND_ADJECTIVES: &[&str] = &[
    "Nyctophobic", "Nylon", "OAFISH", "OBEDIENT", "OBELISKOID", "OBESE", "OBJECTIVE",
    "OBLIVIOUS", "OBLONG", "OBNOXIOUS", "OBSCENE", "OBSEQUIOUS", "OBSERVANT", "OBSESSIVE",
    "OBSIDIAN", "OBSOLETE", "OBTUSE", "OBVIOUS", "OCCASIONAL", "OCCUPATIONAL", "OCEANGOING",
    "OCEANIC", "OCEANLIKE", "OCEANOGRAPHIC", "OCEANOGRAPHICAL", "OCHRE", "OCTAGONAL",
];

pub const ANIMALS: &[&str] = &[
    "maltesedog", "mamba", "mamenchisaurus", "mammal", "mammoth", "manatee", "mandrill",
    "mangabey", "manta", "mantaray", "mantid", "mantis", "mantisray", "manxcat", "mara",
    "marabou", "marbledmurrelet", "mare", "marlin", "marmoset", "marmot", "marten", "martin",
    "massasauga", "massospondylus", "mastiff", "mastodon", "mayfly", "meadowhawk", "meadowlark",
    "mealworm", "meerkat", "megalosaurus", "megalotomusquinquespinosus", "megaraptor",
    "merganser", "merlin", "metalmarkbutterfly", "metamorphosis", "mice", "microvenator",
    "midge", "milksnake", "milkweedbug", "millipede", "minibeast", "mink", "minnow", "mite",
    "moa", "mockingbird", "mole", "mollies", "mollusk", "molly", "monarch", "mongoose",
    "mongrel",
];

fn pick(words: &[&'static str]) -> &'static str {
    words[quad_rand::rand() as usize % words.len()]
}

/// Reseeds the generator for reproducible phrases.
pub fn seed(seed: u64) {
    quad_rand::srand(seed);
}

pub fn seed_from_clock() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    seed(nanos);
}

/// Joins the words for a phrase of `count` words. The animal is always last.
pub fn compose(count: usize, first: &str, second: &str, animal: &str) -> String {
    match count {
        3 => format!("{first}ly {second} {animal}"),
        2 => format!("{second} {animal}"),
        _ => animal.to_owned(),
    }
}

/// Builds a phrase of one to three words.
pub fn random_phrase() -> String {
    let first = pick(FIRST_ADJECTIVES);
    let second = pick(SECOND_ADJECTIVES);
    let animal = pick(ANIMALS);
    let count = 1 + quad_rand::rand() as usize % 3;

    let phrase = compose(count, first, second, animal);
    log::debug!("random phrase: {phrase}");
    phrase
}
