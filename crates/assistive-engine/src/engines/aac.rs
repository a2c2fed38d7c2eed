//! AAC (augmentative and alternative communication) quick-phrase board.

use serde::{Deserialize, Serialize};

pub const INITIAL_MESSAGE: &str = "Klikni karticu";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AacCard {
    pub id: String,
    pub label: String,
    /// Phrase shown and optionally spoken when the card is pressed.
    pub speak: String,
}

pub struct AacBoard {
    cards: Vec<AacCard>,
    message: String,
}

impl AacBoard {
    pub fn new(cards: Vec<AacCard>) -> Self {
        Self {
            cards,
            message: INITIAL_MESSAGE.to_owned(),
        }
    }

    pub fn standard() -> Self {
        let phrases = [
            ("c1", "Trebam pauzu", "Trebam pauzu."),
            ("c2", "Previše je glasno", "Previše je glasno."),
            ("c3", "Ne razumijem", "Ne razumijem."),
            ("c4", "Možeš ponoviti?", "Možeš ponoviti?"),
            ("c5", "Želim mir", "Želim mir."),
            ("c6", "Može raspored?", "Može raspored?"),
            ("c7", "Molim vodu", "Molim vodu."),
            ("c8", "Hvala", "Hvala."),
        ];
        Self::new(
            phrases
                .iter()
                .map(|(id, label, speak)| AacCard {
                    id: (*id).to_owned(),
                    label: (*label).to_owned(),
                    speak: (*speak).to_owned(),
                })
                .collect(),
        )
    }

    /// Show the card's phrase. Returns it so the caller can voice it.
    pub fn press(&mut self, id: &str) -> Option<&str> {
        let card = self.cards.iter().find(|c| c.id == id)?;
        self.message.clone_from(&card.speak);
        Some(&self.message)
    }

    /// Press by position on the board.
    pub fn press_index(&mut self, index: usize) -> Option<&str> {
        let id = self.cards.get(index)?.id.clone();
        self.press(&id)
    }

    pub fn cards(&self) -> &[AacCard] {
        &self.cards
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
