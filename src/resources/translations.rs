use serde::Serialize;

/// A translation the upstream API serves, keyed by its lowercase code.
#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub code: &'static str,
    pub name: &'static str,
    pub language: &'static str,
}

const fn translation(code: &'static str, name: &'static str, language: &'static str) -> Translation {
    Translation {
        code,
        name,
        language,
    }
}

pub static TRANSLATIONS: [Translation; 16] = [
    translation("kjv", "King James Version (1769)", "English"),
    translation("asv", "American Standard Version (1901)", "English"),
    translation("bbe", "Bible in Basic English (1965)", "English"),
    translation("web", "World English Bible", "English"),
    translation("webbe", "World English Bible, British Edition", "English"),
    translation("ylt", "Young's Literal Translation (1898)", "English"),
    translation("darby", "Darby Translation (1890)", "English"),
    translation("dra", "Douay-Rheims 1899 American Edition", "English"),
    translation("oeb-us", "Open English Bible, US Edition", "English"),
    translation("oeb-cw", "Open English Bible, Commonwealth Edition", "English"),
    translation("clementine", "Clementine Latin Vulgate", "Latin"),
    translation("almeida", "João Ferreira de Almeida", "Portuguese"),
    translation("rccv", "Romanian Corrected Cornilescu Version", "Romanian"),
    translation("bkr", "Bible kralická", "Czech"),
    translation("cuv", "Chinese Union Version", "Chinese"),
    translation("cherokee", "Cherokee New Testament", "Cherokee"),
];

/// Resolve a translation code case-insensitively.
pub fn find_translation(code: &str) -> Option<&'static Translation> {
    let wanted = code.trim();
    TRANSLATIONS
        .iter()
        .find(|translation| translation.code.eq_ignore_ascii_case(wanted))
}
