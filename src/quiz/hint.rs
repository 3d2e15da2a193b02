use crate::quiz::{Direction, Question};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Hint {
    /// Element symbols found in a formula prompt, in order of appearance.
    Elements(Vec<String>),
    FirstLetter(char),
    /// Nothing sensible to reveal (empty answer).
    Unavailable,
}

pub fn hint_for(question: &Question) -> Hint {
    if question.direction == Direction::KeyToValue {
        if let Some(elements) = formula_elements(&question.prompt) {
            return Hint::Elements(elements);
        }
    }
    match question.correct.chars().next() {
        Some(first) => Hint::FirstLetter(first),
        None => Hint::Unavailable,
    }
}

const ELEMENT_SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Element symbols of `prompt` when it reads as a compound formula.
///
/// A bare symbol such as `He` is not a formula: listing it would just repeat
/// the prompt. Anything with characters outside symbols, digits and brackets,
/// or with a symbol that is not a real element (`BTS`), is not one either.
pub fn formula_elements(prompt: &str) -> Option<Vec<String>> {
    let mut symbols: Vec<String> = Vec::new();
    let mut has_digit = false;
    let mut chars = prompt.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'A'..='Z' => {
                let mut symbol = c.to_string();
                if let Some(next) = chars.next_if(|n| n.is_ascii_lowercase()) {
                    symbol.push(next);
                }
                if !ELEMENT_SYMBOLS.contains(&symbol.as_str()) {
                    return None;
                }
                if !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
            }
            '0'..='9' => has_digit = true,
            '(' | ')' | '[' | ']' => {}
            _ => return None,
        }
    }

    if symbols.len() > 1 || (has_digit && !symbols.is_empty()) {
        Some(symbols)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(direction: Direction, prompt: &str, correct: &str) -> Question {
        Question {
            direction,
            prompt: prompt.to_string(),
            options: vec![correct.to_string()],
            correct: correct.to_string(),
        }
    }

    fn symbols(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn scans_two_letter_symbols() {
        assert_eq!(formula_elements("NaHCO3"), symbols(&["Na", "H", "C", "O"]));
        assert_eq!(formula_elements("Fe2O3"), symbols(&["Fe", "O"]));
        assert_eq!(formula_elements("C2H5OH"), symbols(&["C", "H", "O"]));
        assert_eq!(formula_elements("(NH4)2SO4"), symbols(&["N", "H", "S", "O"]));
        assert_eq!(formula_elements("NaCl"), symbols(&["Na", "Cl"]));
        assert_eq!(formula_elements("O2"), symbols(&["O"]));
    }

    #[test]
    fn non_formulas_are_rejected() {
        assert_eq!(formula_elements("He"), None);
        assert_eq!(formula_elements("Fe"), None);
        assert_eq!(formula_elements("BTS"), None);
        assert_eq!(formula_elements("pH"), None);
        assert_eq!(formula_elements("Hey"), None);
        assert_eq!(formula_elements("H2O 물"), None);
        assert_eq!(formula_elements("물"), None);
        assert_eq!(formula_elements(""), None);
    }

    #[test]
    fn formula_prompt_gives_elements() {
        let hint = hint_for(&question(Direction::KeyToValue, "AgNO3", "질산 은"));
        assert_eq!(
            hint,
            Hint::Elements(vec!["Ag".to_string(), "N".to_string(), "O".to_string()])
        );
    }

    #[test]
    fn name_prompt_gives_first_letter() {
        let hint = hint_for(&question(Direction::ValueToKey, "암모니아", "NH3"));
        assert_eq!(hint, Hint::FirstLetter('N'));
    }

    #[test]
    fn prompt_without_symbols_falls_back_to_first_letter() {
        let hint = hint_for(&question(Direction::KeyToValue, "아이유", "가수"));
        assert_eq!(hint, Hint::FirstLetter('가'));
        let hint = hint_for(&question(Direction::ValueToKey, "?", ""));
        assert_eq!(hint, Hint::Unavailable);
    }

    #[test]
    fn bare_symbol_prompt_gives_first_letter() {
        let hint = hint_for(&question(Direction::KeyToValue, "He", "헬륨"));
        assert_eq!(hint, Hint::FirstLetter('헬'));
        let hint = hint_for(&question(Direction::KeyToValue, "Na", "나트륨"));
        assert_eq!(hint, Hint::FirstLetter('나'));
    }

    #[test]
    fn custom_key_gives_first_letter() {
        let hint = hint_for(&question(Direction::KeyToValue, "BTS", "방탄소년단"));
        assert_eq!(hint, Hint::FirstLetter('방'));
        let hint = hint_for(&question(Direction::KeyToValue, "HCl", "염화 수소"));
        assert_eq!(hint, Hint::Elements(vec!["H".to_string(), "Cl".to_string()]));
    }
}
