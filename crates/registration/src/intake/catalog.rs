use serde::Serialize;

pub const UNKNOWN_PROGRAM: &str = "Unknown Program";

/// Offered program, keyed by its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgramEntry {
    pub code: &'static str,
    pub name: &'static str,
}

/// Closed code-to-name table, in the order shown in the program picker.
pub const PROGRAM_CATALOG: [ProgramEntry; 3] = [
    ProgramEntry {
        code: "CS",
        name: "Computer Science",
    },
    ProgramEntry {
        code: "IT",
        name: "Information Technology",
    },
    ProgramEntry {
        code: "EC",
        name: "Electronics & Communication",
    },
];

pub fn lookup_program(code: &str) -> Option<&'static ProgramEntry> {
    PROGRAM_CATALOG.iter().find(|entry| entry.code == code)
}

/// Display name for a code, falling back to `UNKNOWN_PROGRAM`.
pub fn resolve_program_name(code: &str) -> &'static str {
    lookup_program(code)
        .map(|entry| entry.name)
        .unwrap_or(UNKNOWN_PROGRAM)
}
