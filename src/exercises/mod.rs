//! Exercise catalog and the pluggable providers behind it

pub mod arithmetic;
pub mod challenge;
pub mod comparison;
pub mod missing;

pub use challenge::{Challenge, ChallengeProvider, InputWidget};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::exercises::arithmetic::{AdditionProvider, MultiplicationProvider, SubtractionProvider};
use crate::exercises::comparison::ComparisonProvider;
use crate::exercises::missing::MissingTermProvider;

/// Every exercise the app ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    Addition,
    Subtraction,
    Multiplication,
    Comparison,
    MissingTerm,
}

impl ExerciseKind {
    /// All kinds in menu order
    pub fn all() -> &'static [ExerciseKind] {
        &[
            ExerciseKind::Addition,
            ExerciseKind::Subtraction,
            ExerciseKind::Multiplication,
            ExerciseKind::Comparison,
            ExerciseKind::MissingTerm,
        ]
    }

    /// Stable identifier used in logs and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            ExerciseKind::Addition => "addition",
            ExerciseKind::Subtraction => "subtraction",
            ExerciseKind::Multiplication => "multiplication",
            ExerciseKind::Comparison => "comparison",
            ExerciseKind::MissingTerm => "missing-term",
        }
    }

    /// Menu title
    pub fn title(&self) -> &'static str {
        match self {
            ExerciseKind::Addition => "Addition",
            ExerciseKind::Subtraction => "Subtraction",
            ExerciseKind::Multiplication => "Multiplication",
            ExerciseKind::Comparison => "Bigger or smaller?",
            ExerciseKind::MissingTerm => "Find the missing number",
        }
    }

    /// Construct the provider implementing this exercise
    pub fn provider(&self) -> Box<dyn ChallengeProvider> {
        match self {
            ExerciseKind::Addition => Box::new(AdditionProvider::default()),
            ExerciseKind::Subtraction => Box::new(SubtractionProvider::default()),
            ExerciseKind::Multiplication => Box::new(MultiplicationProvider::default()),
            ExerciseKind::Comparison => Box::new(ComparisonProvider::default()),
            ExerciseKind::MissingTerm => Box::new(MissingTermProvider::default()),
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
