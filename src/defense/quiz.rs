//! Vocabulary quiz that funds the player's attack points
//!
//! Three question modes:
//! - Memorize: word and meaning shown, acknowledging earns a small reward
//! - MultipleChoice: pick the meaning from four options
//! - Spelling: meaning shown, type the word

use serde::{Deserialize, Serialize};

use crate::consts::{CHOICE_REWARD, MEMORIZE_REWARD, SPELLING_REWARD};
use crate::rng::RandomSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub meaning: String,
    /// Four candidate meanings, one of them correct
    pub options: Vec<String>,
}

impl VocabularyEntry {
    pub fn new(word: &str, meaning: &str, options: [&str; 4]) -> Self {
        Self {
            word: word.to_string(),
            meaning: meaning.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// The stock word list
pub fn default_vocabulary() -> Vec<VocabularyEntry> {
    vec![
        VocabularyEntry::new("apple", "사과", ["사과", "바나나", "오렌지", "포도"]),
        VocabularyEntry::new("book", "책", ["책", "연필", "가방", "의자"]),
        VocabularyEntry::new("computer", "컴퓨터", ["전화기", "컴퓨터", "시계", "라디오"]),
        VocabularyEntry::new("house", "집", ["차", "집", "학교", "공원"]),
        VocabularyEntry::new("water", "물", ["불", "흙", "물", "바람"]),
        VocabularyEntry::new("friend", "친구", ["가족", "이웃", "친구", "적"]),
        VocabularyEntry::new("time", "시간", ["시간", "날짜", "계절", "년도"]),
        VocabularyEntry::new("money", "돈", ["동전", "지폐", "돈", "금"]),
        VocabularyEntry::new("school", "학교", ["병원", "학교", "도서관", "식당"]),
        VocabularyEntry::new("music", "음악", ["그림", "음악", "영화", "책"]),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    Memorize,
    MultipleChoice,
    Spelling,
}

impl QuizMode {
    /// Map a roll in [0, 5) to a mode: 3/5 memorize, 1/5 each for the rest
    pub fn from_roll(roll: usize) -> Self {
        match roll {
            0..=2 => QuizMode::Memorize,
            3 => QuizMode::MultipleChoice,
            _ => QuizMode::Spelling,
        }
    }
}

/// Attack points granted per mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizRewards {
    pub memorize: u32,
    pub choice: u32,
    pub spelling: u32,
}

impl Default for QuizRewards {
    fn default() -> Self {
        Self {
            memorize: MEMORIZE_REWARD,
            choice: CHOICE_REWARD,
            spelling: SPELLING_REWARD,
        }
    }
}

/// What the UI shows for the open question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPrompt {
    pub mode: QuizMode,
    pub word: Option<String>,
    pub meaning: Option<String>,
    pub options: Vec<String>,
    pub answered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub correct: bool,
    /// Attack points earned
    pub reward: u32,
    /// The expected answer, for feedback
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Question {
    entry: usize,
    mode: QuizMode,
    answered: bool,
}

#[derive(Debug, Clone)]
pub struct Quiz {
    vocabulary: Vec<VocabularyEntry>,
    rewards: QuizRewards,
    current: Option<Question>,
    asked: u32,
    correct: u32,
}

impl Quiz {
    pub fn new(vocabulary: Vec<VocabularyEntry>, rewards: QuizRewards) -> Self {
        Self {
            vocabulary,
            rewards,
            current: None,
            asked: 0,
            correct: 0,
        }
    }

    /// Open a new random question. `None` only for an empty word list.
    pub fn next<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<QuizPrompt> {
        if self.vocabulary.is_empty() {
            return None;
        }
        let entry = rng.index(self.vocabulary.len());
        let mode = QuizMode::from_roll(rng.index(5));
        self.current = Some(Question {
            entry,
            mode,
            answered: false,
        });
        self.asked += 1;
        log::debug!("Quiz question: {} ({:?})", self.vocabulary[entry].word, mode);
        self.prompt()
    }

    pub fn prompt(&self) -> Option<QuizPrompt> {
        let q = self.current.as_ref()?;
        let entry = &self.vocabulary[q.entry];
        let (word, meaning, options) = match q.mode {
            QuizMode::Memorize => (Some(entry.word.clone()), Some(entry.meaning.clone()), Vec::new()),
            QuizMode::MultipleChoice => (Some(entry.word.clone()), None, entry.options.clone()),
            QuizMode::Spelling => (None, Some(entry.meaning.clone()), Vec::new()),
        };
        Some(QuizPrompt {
            mode: q.mode,
            word,
            meaning,
            options,
            answered: q.answered,
        })
    }

    pub fn mode(&self) -> Option<QuizMode> {
        self.current.as_ref().map(|q| q.mode)
    }

    /// Open and still waiting for an answer in `mode`
    fn open_entry(&mut self, mode: QuizMode) -> Option<&VocabularyEntry> {
        let q = self.current.as_mut()?;
        if q.mode != mode || q.answered {
            return None;
        }
        q.answered = true;
        Some(&self.vocabulary[q.entry])
    }

    fn record(&mut self, correct: bool, reward: u32, expected: String) -> QuizResult {
        if correct {
            self.correct += 1;
        }
        QuizResult {
            correct,
            reward: if correct { reward } else { 0 },
            expected,
        }
    }

    /// Answer a multiple-choice question
    pub fn answer_choice(&mut self, option: &str) -> Option<QuizResult> {
        let meaning = self.open_entry(QuizMode::MultipleChoice)?.meaning.clone();
        let reward = self.rewards.choice;
        Some(self.record(option == meaning, reward, meaning))
    }

    /// Answer a spelling question; whitespace and case are ignored
    pub fn answer_spelling(&mut self, input: &str) -> Option<QuizResult> {
        let word = self.open_entry(QuizMode::Spelling)?.word.clone();
        let reward = self.rewards.spelling;
        let correct = input.trim().eq_ignore_ascii_case(&word);
        Some(self.record(correct, reward, word))
    }

    /// Confirm a memorize card
    pub fn acknowledge(&mut self) -> Option<QuizResult> {
        let meaning = self.open_entry(QuizMode::Memorize)?.meaning.clone();
        let reward = self.rewards.memorize;
        Some(self.record(true, reward, meaning))
    }

    pub fn asked(&self) -> u32 {
        self.asked
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new(default_vocabulary(), QuizRewards::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    /// entry roll then mode roll
    fn quiz_with(entry: f64, mode: f64) -> (Quiz, ScriptedRandom) {
        (Quiz::default(), ScriptedRandom::new(vec![entry, mode]))
    }

    #[test]
    fn test_mode_distribution_mapping() {
        assert_eq!(QuizMode::from_roll(0), QuizMode::Memorize);
        assert_eq!(QuizMode::from_roll(2), QuizMode::Memorize);
        assert_eq!(QuizMode::from_roll(3), QuizMode::MultipleChoice);
        assert_eq!(QuizMode::from_roll(4), QuizMode::Spelling);
    }

    #[test]
    fn test_multiple_choice() {
        // entry 0 (apple), mode roll 0.7 * 5 = 3 -> choice
        let (mut quiz, mut rng) = quiz_with(0.0, 0.7);
        let prompt = quiz.next(&mut rng).unwrap();
        assert_eq!(prompt.mode, QuizMode::MultipleChoice);
        assert_eq!(prompt.word.as_deref(), Some("apple"));
        assert_eq!(prompt.meaning, None);
        assert_eq!(prompt.options.len(), 4);

        let result = quiz.answer_choice("사과").unwrap();
        assert!(result.correct);
        assert_eq!(result.reward, CHOICE_REWARD);
        // Already answered
        assert!(quiz.answer_choice("사과").is_none());
        assert!(quiz.prompt().unwrap().answered);
    }

    #[test]
    fn test_wrong_choice_earns_nothing() {
        let (mut quiz, mut rng) = quiz_with(0.0, 0.7);
        quiz.next(&mut rng);
        let result = quiz.answer_choice("포도").unwrap();
        assert!(!result.correct);
        assert_eq!(result.reward, 0);
        assert_eq!(result.expected, "사과");
    }

    #[test]
    fn test_spelling_ignores_case_and_whitespace() {
        // entry 0.15 * 10 = 1 (book), mode 0.9 * 5 = 4 -> spelling
        let (mut quiz, mut rng) = quiz_with(0.15, 0.9);
        let prompt = quiz.next(&mut rng).unwrap();
        assert_eq!(prompt.mode, QuizMode::Spelling);
        assert_eq!(prompt.word, None);
        assert_eq!(prompt.meaning.as_deref(), Some("책"));

        let result = quiz.answer_spelling("  BoOk \n").unwrap();
        assert!(result.correct);
        assert_eq!(result.reward, SPELLING_REWARD);
    }

    #[test]
    fn test_memorize_acknowledge() {
        let (mut quiz, mut rng) = quiz_with(0.0, 0.1);
        let prompt = quiz.next(&mut rng).unwrap();
        assert_eq!(prompt.mode, QuizMode::Memorize);
        assert!(prompt.word.is_some() && prompt.meaning.is_some());
        assert_eq!(quiz.acknowledge().unwrap().reward, MEMORIZE_REWARD);
    }

    #[test]
    fn test_wrong_mode_rejected() {
        let (mut quiz, mut rng) = quiz_with(0.0, 0.1);
        quiz.next(&mut rng);
        assert!(quiz.answer_choice("사과").is_none());
        assert!(quiz.answer_spelling("apple").is_none());
        assert!(Quiz::default().acknowledge().is_none());
    }

    #[test]
    fn test_every_entry_lists_its_meaning() {
        for entry in default_vocabulary() {
            assert_eq!(entry.options.len(), 4);
            assert!(entry.options.contains(&entry.meaning));
        }
    }
}
