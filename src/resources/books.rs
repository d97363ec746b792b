use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

/// One canonical book with its three-letter abbreviation.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub position: u8,
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub testament: Testament,
    pub chapters: u16,
    #[serde(skip)]
    pub aliases: &'static [&'static str],
}

const fn book(
    position: u8,
    name: &'static str,
    abbreviation: &'static str,
    testament: Testament,
    chapters: u16,
    aliases: &'static [&'static str],
) -> Book {
    Book {
        position,
        name,
        abbreviation,
        testament,
        chapters,
        aliases,
    }
}

use Testament::{New, Old};

pub static BOOKS: [Book; 66] = [
    book(1, "Genesis", "Gen", Old, 50, &["Gn"]),
    book(2, "Exodus", "Exo", Old, 40, &["Ex", "Exod"]),
    book(3, "Leviticus", "Lev", Old, 27, &["Lv"]),
    book(4, "Numbers", "Num", Old, 36, &["Nm"]),
    book(5, "Deuteronomy", "Deu", Old, 34, &["Dt", "Deut"]),
    book(6, "Joshua", "Jos", Old, 24, &["Josh"]),
    book(7, "Judges", "Jdg", Old, 21, &["Judg"]),
    book(8, "Ruth", "Rut", Old, 4, &["Ru"]),
    book(9, "1 Samuel", "1Sa", Old, 31, &["1 Sam", "I Samuel"]),
    book(10, "2 Samuel", "2Sa", Old, 24, &["2 Sam", "II Samuel"]),
    book(11, "1 Kings", "1Ki", Old, 22, &["1 Kgs", "I Kings"]),
    book(12, "2 Kings", "2Ki", Old, 25, &["2 Kgs", "II Kings"]),
    book(13, "1 Chronicles", "1Ch", Old, 29, &["1 Chr", "I Chronicles"]),
    book(14, "2 Chronicles", "2Ch", Old, 36, &["2 Chr", "II Chronicles"]),
    book(15, "Ezra", "Ezr", Old, 10, &[]),
    book(16, "Nehemiah", "Neh", Old, 13, &[]),
    book(17, "Esther", "Est", Old, 10, &["Esth"]),
    book(18, "Job", "Job", Old, 42, &["Jb"]),
    book(19, "Psalms", "Psa", Old, 150, &["Psalm", "Ps", "Pss"]),
    book(20, "Proverbs", "Pro", Old, 31, &["Prov", "Prv"]),
    book(21, "Ecclesiastes", "Ecc", Old, 12, &["Eccl", "Qoheleth"]),
    book(
        22,
        "Song of Solomon",
        "Son",
        Old,
        8,
        &["Song of Songs", "Song", "Canticles"],
    ),
    book(23, "Isaiah", "Isa", Old, 66, &["Is"]),
    book(24, "Jeremiah", "Jer", Old, 52, &[]),
    book(25, "Lamentations", "Lam", Old, 5, &[]),
    book(26, "Ezekiel", "Eze", Old, 48, &["Ezek"]),
    book(27, "Daniel", "Dan", Old, 12, &["Dn"]),
    book(28, "Hosea", "Hos", Old, 14, &[]),
    book(29, "Joel", "Joe", Old, 3, &["Jl"]),
    book(30, "Amos", "Amo", Old, 9, &["Am"]),
    book(31, "Obadiah", "Oba", Old, 1, &["Obad"]),
    book(32, "Jonah", "Jon", Old, 4, &["Jnh"]),
    book(33, "Micah", "Mic", Old, 7, &[]),
    book(34, "Nahum", "Nah", Old, 3, &[]),
    book(35, "Habakkuk", "Hab", Old, 3, &[]),
    book(36, "Zephaniah", "Zep", Old, 3, &["Zeph"]),
    book(37, "Haggai", "Hag", Old, 2, &[]),
    book(38, "Zechariah", "Zec", Old, 14, &["Zech"]),
    book(39, "Malachi", "Mal", Old, 4, &[]),
    book(40, "Matthew", "Mat", New, 28, &["Matt", "Mt"]),
    book(41, "Mark", "Mar", New, 16, &["Mk", "Mrk"]),
    book(42, "Luke", "Luk", New, 24, &["Lk"]),
    book(43, "John", "Joh", New, 21, &["Jn", "Jhn"]),
    book(44, "Acts", "Act", New, 28, &["Acts of the Apostles"]),
    book(45, "Romans", "Rom", New, 16, &["Rm"]),
    book(46, "1 Corinthians", "1Co", New, 16, &["1 Cor", "I Corinthians"]),
    book(47, "2 Corinthians", "2Co", New, 13, &["2 Cor", "II Corinthians"]),
    book(48, "Galatians", "Gal", New, 6, &[]),
    book(49, "Ephesians", "Eph", New, 6, &[]),
    book(50, "Philippians", "Phi", New, 4, &["Phil", "Php"]),
    book(51, "Colossians", "Col", New, 4, &[]),
    book(52, "1 Thessalonians", "1Th", New, 5, &["1 Thess", "I Thessalonians"]),
    book(53, "2 Thessalonians", "2Th", New, 3, &["2 Thess", "II Thessalonians"]),
    book(54, "1 Timothy", "1Ti", New, 6, &["1 Tim", "I Timothy"]),
    book(55, "2 Timothy", "2Ti", New, 4, &["2 Tim", "II Timothy"]),
    book(56, "Titus", "Tit", New, 3, &[]),
    book(57, "Philemon", "Phm", New, 1, &["Philem"]),
    book(58, "Hebrews", "Heb", New, 13, &[]),
    book(59, "James", "Jam", New, 5, &["Jas"]),
    book(60, "1 Peter", "1Pe", New, 5, &["1 Pet", "I Peter"]),
    book(61, "2 Peter", "2Pe", New, 3, &["2 Pet", "II Peter"]),
    book(62, "1 John", "1Jo", New, 5, &["1 Jn", "I John"]),
    book(63, "2 John", "2Jo", New, 1, &["2 Jn", "II John"]),
    book(64, "3 John", "3Jo", New, 1, &["3 Jn", "III John"]),
    book(65, "Jude", "Jud", New, 1, &[]),
    book(66, "Revelation", "Rev", New, 22, &["Revelations", "Apocalypse"]),
];

/// Resolve a book by name, abbreviation, or common alias (case and spacing insensitive).
pub fn find_book(name: &str) -> Option<&'static Book> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    BOOKS.iter().find(|book| {
        normalize(book.name) == wanted
            || normalize(book.abbreviation) == wanted
            || book.aliases.iter().any(|alias| normalize(alias) == wanted)
    })
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}
