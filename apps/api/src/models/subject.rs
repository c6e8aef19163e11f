use serde::Serialize;

/// A university course offered as a Period-1 choice, with the major it belongs to.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UniversitySubject {
    pub subject: &'static str,
    pub major: &'static str,
}

pub const UNIVERSITY_SUBJECTS: &[UniversitySubject] = &[
    UniversitySubject { subject: "Biology", major: "Life Sciences" },
    UniversitySubject { subject: "Organic Chemistry", major: "Chemistry" },
    UniversitySubject { subject: "Solid State Physics", major: "Physics" },
    UniversitySubject { subject: "Linear Algebra", major: "Mathematics" },
    UniversitySubject { subject: "Statistics", major: "Statistics" },
    UniversitySubject { subject: "Data Structures", major: "Computer Science" },
    UniversitySubject { subject: "Machine Learning", major: "Computer Science" },
    UniversitySubject { subject: "Circuit Theory", major: "Electrical Engineering" },
    UniversitySubject { subject: "Materials Science", major: "Materials Engineering" },
    UniversitySubject { subject: "Economics", major: "Economics" },
    UniversitySubject { subject: "Business Administration", major: "Business" },
    UniversitySubject { subject: "International Relations", major: "Political Science" },
    UniversitySubject { subject: "Environmental Science", major: "Environmental Engineering" },
    UniversitySubject { subject: "Psychology", major: "Psychology" },
    UniversitySubject { subject: "Media Studies", major: "Communication" },
    UniversitySubject { subject: "Law and Society", major: "Law" },
    UniversitySubject { subject: "Architectural Design", major: "Architecture" },
    UniversitySubject { subject: "Nursing Practice", major: "Nursing" },
];
