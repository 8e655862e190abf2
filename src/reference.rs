//! Static compliance reference data. Pure lookup tables, no logic; the
//! return names are opaque labels, no filing is performed.

/// Statutory return filing deadlines shown on the compliance screen.
pub const DEADLINES: [(&str, &str); 4] = [
    ("GSTR-1", "11th of next month"),
    ("GSTR-3B", "20th of next month"),
    ("GSTR-9", "31st December"),
    ("Annual Return", "31st December"),
];

/// Monthly compliance checklist labels. Tick state lives in the screen and
/// is never persisted.
pub const CHECKLIST: [&str; 6] = [
    "Reconcile purchase and sales registers",
    "Check for missing invoices",
    "Verify ITC claims",
    "Review reverse charge applicability",
    "Check e-way bill compliance",
    "Verify tax payment details",
];
