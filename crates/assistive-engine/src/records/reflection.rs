//! Free-text reflection answers after the school retrofit game.

use serde::{Deserialize, Serialize};

use crate::core::store::{RecordKey, Store};

pub const REFLECTION_KEY: RecordKey = RecordKey::new("movement", "reflection", 1);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reflection {
    /// What would help you if the school had obstacles?
    pub q1: String,
    /// Which single change would make your school more accessible?
    pub q2: String,
}

impl Reflection {
    pub fn load(store: &Store) -> Self {
        store.read(&REFLECTION_KEY, Self::default())
    }

    pub fn save(&self, store: &mut Store) {
        store.write(&REFLECTION_KEY, self);
    }

    /// Set answer 1 or 2. Other indices are ignored.
    pub fn set_answer(&mut self, question: u32, text: &str) -> bool {
        match question {
            1 => self.q1 = text.to_owned(),
            2 => self.q2 = text.to_owned(),
            _ => return false,
        }
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_survive_reload() {
        let mut store = Store::in_memory();
        let mut r = Reflection::load(&store);
        assert!(r.set_answer(1, "rampa"));
        assert!(r.set_answer(2, "rukohvati"));
        assert!(!r.set_answer(3, "lift"));
        r.save(&mut store);
        assert_eq!(Reflection::load(&store), r);
    }

    #[test]
    fn clear_empties_both_answers() {
        let mut r = Reflection { q1: "a".into(), q2: "b".into() };
        r.clear();
        assert_eq!(r, Reflection::default());
    }

    #[test]
    fn partial_record_loads() {
        let mut store = Store::in_memory();
        store.write_raw(&REFLECTION_KEY, r#"{"q1":"lift"}"#);
        let r = Reflection::load(&store);
        assert_eq!(r.q1, "lift");
        assert!(r.q2.is_empty());
    }
}
