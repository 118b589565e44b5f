// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The category a candidate competes in, and the category that a position
/// of the convocation list reserves.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Category {
    /// Open competition (ampla concorrência).
    Geral,
    /// Ethnicity-based quota.
    Negro,
    /// Disability quota.
    Pcd,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Geral, Category::Negro, Category::Pcd];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Geral => "GERAL",
            Category::Negro => "NEGRO",
            Category::Pcd => "PCD",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of a level-scoped pool: the program the candidate applied for and
/// the candidate name. Rows are kept in rank order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PoolRow {
    pub program: String,
    pub name: String,
}

/// The three ranked pools of a single program.
///
/// Candidates are identified by their name only. Two different people sharing
/// the exact same name are treated as the same candidate.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CoursePools {
    pub geral: Vec<String>,
    pub negro: Vec<String>,
    pub pcd: Vec<String>,
}

impl CoursePools {
    pub fn pool(&self, category: Category) -> &[String] {
        match category {
            Category::Geral => &self.geral,
            Category::Negro => &self.negro,
            Category::Pcd => &self.pcd,
        }
    }
}

/// The three ranked pools of one education level, every row tagged by program.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct LevelPools {
    pub level: String,
    pub geral: Vec<PoolRow>,
    pub negro: Vec<PoolRow>,
    pub pcd: Vec<PoolRow>,
}

impl LevelPools {
    pub fn pool(&self, category: Category) -> &[PoolRow] {
        match category {
            Category::Geral => &self.geral,
            Category::Negro => &self.negro,
            Category::Pcd => &self.pcd,
        }
    }
}

/// Errors raised while assembling the pools.
///
/// The allocation itself never fails.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum PoolErrors {
    EmptyProgram { name: String },
    EmptyName { program: String },
}

impl Error for PoolErrors {}

impl Display for PoolErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolErrors::EmptyProgram { name } => {
                write!(f, "candidate {:?} has no program", name)
            }
            PoolErrors::EmptyName { program } => {
                write!(f, "empty candidate name in program {:?}", program)
            }
        }
    }
}

// ******** Output data structures *********

/// One line of the convocation list.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct ConvocationEntry {
    /// 1-based position within the program.
    pub position: u32,
    /// The category the candidate was convoked under. This may be GERAL for a
    /// position reserved to a quota, when the quota pool ran dry.
    pub category: Category,
    pub candidate: String,
    pub program: String,
    pub level: String,
}

/// How much of the candidate universe of a program made it into the list.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CourseReport {
    pub program: String,
    pub level: String,
    /// Number of distinct names across the three pools.
    pub universe: usize,
    /// Number of entries emitted for the program.
    pub emitted: usize,
}

impl CourseReport {
    /// The allocation stops at the first position it cannot fill, which may
    /// leave some candidates out of the list.
    pub fn is_under_filled(&self) -> bool {
        self.emitted < self.universe
    }
}
