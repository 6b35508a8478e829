use serde::Serialize;

/// Role of an alignment input, selected by the flag it was given with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRole {
    /// Short-insert paired-end library (`--frags`)
    Fragments,
    /// Long-insert mate-pair library (`--jumps`)
    Jumps,
    /// Unpaired reads (`--unpaired`)
    Unpaired,
}

impl InputRole {
    pub const ALL: [InputRole; 3] = [InputRole::Fragments, InputRole::Jumps, InputRole::Unpaired];

    /// Name of the command-line flag (and clap argument id) for this role
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Self::Fragments => "frags",
            Self::Jumps => "jumps",
            Self::Unpaired => "unpaired",
        }
    }
}

impl std::fmt::Display for InputRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flag())
    }
}

/// Category of assembly fix the engine is allowed to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixCategory {
    /// Single-base and small indel corrections
    Bases,
    /// Gap filling
    Gaps,
    /// Local misassembly repair
    Local,
    /// Novel sequence assembly (experimental)
    Novel,
    /// Break at unresolvable misassemblies (experimental)
    Breaks,
}

impl FixCategory {
    /// The set `all` expands to, in declaration order
    pub const STANDARD: [FixCategory; 3] = [FixCategory::Bases, FixCategory::Gaps, FixCategory::Local];

    /// Parse a category name. Directives like `all` and `none` are not categories.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bases" => Some(Self::Bases),
            "gaps" => Some(Self::Gaps),
            "local" => Some(Self::Local),
            "novel" => Some(Self::Novel),
            "breaks" => Some(Self::Breaks),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_experimental(self) -> bool {
        matches!(self, Self::Novel | Self::Breaks)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bases => "bases",
            Self::Gaps => "gaps",
            Self::Local => "local",
            Self::Novel => "novel",
            Self::Breaks => "breaks",
        }
    }
}

impl std::fmt::Display for FixCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of issue a region reports as a list of sub-ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Unconfirmed,
    CollapsedRepeat,
    Changed,
    Insertion,
    Deletion,
    Gap,
    Break,
}

impl IssueKind {
    pub const COUNT: usize = 7;

    /// All kinds, in the order they are reported
    pub const ALL: [IssueKind; Self::COUNT] = [
        IssueKind::Unconfirmed,
        IssueKind::CollapsedRepeat,
        IssueKind::Changed,
        IssueKind::Insertion,
        IssueKind::Deletion,
        IssueKind::Gap,
        IssueKind::Break,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
