use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::quiz::VocabularyPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Category {
    Molecule,
    Periodic,
    /// Pairs loaded from a CSV file at startup.
    Custom,
}

impl Category {
    /// Label the ranking table is keyed by.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Molecule => "화학식 게임",
            Category::Periodic => "주기율표 게임",
            Category::Custom => "사용자 게임",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        [Category::Molecule, Category::Periodic, Category::Custom]
            .into_iter()
            .find(|c| c.tag() == tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

// (formula, name)
const MOLECULES: [(&str, &str); 20] = [
    ("H2O", "물"),
    ("CO2", "이산화탄소"),
    ("O2", "산소"),
    ("N2", "질소"),
    ("CH4", "메테인"),
    ("C2H6", "에테인"),
    ("C2H5OH", "에탄올"),
    ("C6H6", "벤젠"),
    ("C6H12O6", "포도당"),
    ("NaCl", "염화 나트륨"),
    ("HCl", "염산"),
    ("NH3", "암모니아"),
    ("H2SO4", "황산"),
    ("CaCO3", "탄산 칼슘"),
    ("KNO3", "질산 칼륨"),
    ("NaHCO3", "탄산수소 나트륨"),
    ("H2O2", "과산화 수소"),
    ("SiO2", "이산화 규소"),
    ("Fe2O3", "산화 철(III)"),
    ("AgNO3", "질산 은"),
];

const EASY_MOLECULES: [&str; 7] = ["H2O", "CO2", "O2", "CH4", "C2H5OH", "NaCl", "C6H12O6"];

const HARD_EXTRA_MOLECULES: [(&str, &str); 3] = [
    ("C3H8", "프로페인"),
    ("C4H10", "뷰테인"),
    ("C3H6", "프로펜"),
];

// (symbol, name), ordered by atomic number
const ELEMENTS: [(&str, &str); 30] = [
    ("H", "수소"),
    ("He", "헬륨"),
    ("Li", "리튬"),
    ("Be", "베릴륨"),
    ("B", "붕소"),
    ("C", "탄소"),
    ("N", "질소"),
    ("O", "산소"),
    ("F", "플루오린"),
    ("Ne", "네온"),
    ("Na", "나트륨"),
    ("Mg", "마그네슘"),
    ("Al", "알루미늄"),
    ("Si", "규소"),
    ("P", "인"),
    ("S", "황"),
    ("Cl", "염소"),
    ("Ar", "아르곤"),
    ("K", "칼륨"),
    ("Ca", "칼슘"),
    ("Sc", "스칸듐"),
    ("Ti", "타이타늄"),
    ("V", "바나듐"),
    ("Cr", "크로뮴"),
    ("Mn", "망가니즈"),
    ("Fe", "철"),
    ("Co", "코발트"),
    ("Ni", "니켈"),
    ("Cu", "구리"),
    ("Zn", "아연"),
];

fn to_pairs<'a>(table: impl IntoIterator<Item = &'a (&'a str, &'a str)>) -> Vec<VocabularyPair> {
    table
        .into_iter()
        .map(|(key, value)| VocabularyPair::new(*key, *value))
        .collect()
}

/// Built-in pool for a category. `Custom` has no built-in pool and yields nothing.
pub fn builtin_pairs(category: Category, difficulty: Difficulty) -> Vec<VocabularyPair> {
    match (category, difficulty) {
        (Category::Molecule, Difficulty::Easy) => to_pairs(
            MOLECULES
                .iter()
                .filter(|(formula, _)| EASY_MOLECULES.contains(formula)),
        ),
        (Category::Molecule, Difficulty::Medium) => to_pairs(&MOLECULES),
        (Category::Molecule, Difficulty::Hard) => {
            to_pairs(MOLECULES.iter().chain(HARD_EXTRA_MOLECULES.iter()))
        }
        (Category::Periodic, Difficulty::Easy) => to_pairs(&ELEMENTS[..10]),
        (Category::Periodic, Difficulty::Medium) => to_pairs(&ELEMENTS[..20]),
        (Category::Periodic, Difficulty::Hard) => to_pairs(&ELEMENTS),
        (Category::Custom, _) => Vec::new(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset contains no pairs")]
    Empty,
}

#[derive(Debug, serde::Deserialize)]
struct DatasetRow {
    key: String,
    value: String,
}

/// Reads a CSV with a `key,value` header. Blank rows are skipped; surrounding
/// whitespace is trimmed.
pub fn load_pairs<R: Read>(reader: R) -> Result<Vec<VocabularyPair>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for row in csv_reader.deserialize() {
        let row: DatasetRow = row?;
        if row.key.is_empty() || row.value.is_empty() {
            continue;
        }
        pairs.push(VocabularyPair::new(row.key, row.value));
    }

    if pairs.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(pairs)
}

pub fn load_pairs_from_path(path: &Path) -> Result<Vec<VocabularyPair>, DatasetError> {
    let file = File::open(path)?;
    load_pairs(file)
}
