// Allowed-value sets for the registry's classification fields, mirrored
// from the database schema enums. Values are stored keys, not display
// labels. The validation layer treats these as opaque lists.

pub const SEX: &[&str] = &["male", "female"];

pub const CIVIL_STATUS: &[&str] = &[
    "single",
    "married",
    "widowed",
    "separated",
    "divorced",
    "annulled",
];

pub const BLOOD_TYPE: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-", "unknown"];

pub const CITIZENSHIP: &[&str] = &["filipino", "dual_citizen", "foreigner"];

pub const RELIGION: &[&str] = &[
    "roman_catholic",
    "islam",
    "iglesia_ni_cristo",
    "evangelical",
    "protestant",
    "aglipayan",
    "buddhist",
    "none",
    "other",
];

pub const ETHNICITY: &[&str] = &[
    "tagalog",
    "cebuano",
    "ilocano",
    "bisaya",
    "hiligaynon",
    "bikolano",
    "waray",
    "kapampangan",
    "pangasinense",
    "moro",
    "indigenous",
    "other",
];

pub const EDUCATION_LEVEL: &[&str] = &[
    "no_formal_education",
    "elementary",
    "elementary_graduate",
    "high_school",
    "high_school_graduate",
    "vocational",
    "college",
    "college_graduate",
    "postgraduate",
];

pub const EMPLOYMENT_STATUS: &[&str] = &[
    "employed",
    "self_employed",
    "unemployed",
    "student",
    "retired",
    "homemaker",
];

pub const INCOME_CLASS: &[&str] = &[
    "poor",
    "low_income",
    "lower_middle",
    "middle",
    "upper_middle",
    "upper_income",
    "rich",
];

pub const RESIDENT_STATUS: &[&str] = &["active", "moved_out", "deceased", "transferred"];

pub const HOUSEHOLD_ROLE: &[&str] = &[
    "head",
    "spouse",
    "child",
    "parent",
    "sibling",
    "extended",
    "boarder",
    "helper",
];
