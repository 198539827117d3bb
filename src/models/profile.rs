use serde::{Deserialize, Serialize};

/// Department assigned to freshly created profiles.
pub const DEFAULT_DEPARTMENT: &str = "ภาควิชาวิศวกรรมคอมพิวเตอร์";

/// Student internship profile (one per user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub company_name: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub supervisor_name: String,
    pub supervisor_position: String,
    pub department: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            student_id: String::new(),
            company_name: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            supervisor_name: String::new(),
            supervisor_position: String::new(),
            department: DEFAULT_DEPARTMENT.to_string(),
        }
    }
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Partial update applied by `profile set`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_id: Option<String>,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub supervisor_name: Option<String>,
    pub supervisor_position: Option<String>,
    pub department: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.student_id.is_none()
            && self.company_name.is_none()
            && self.position.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.supervisor_name.is_none()
            && self.supervisor_position.is_none()
            && self.department.is_none()
    }

    pub fn apply(&self, profile: &mut Profile) {
        let fields: [(&Option<String>, &mut String); 10] = [
            (&self.first_name, &mut profile.first_name),
            (&self.last_name, &mut profile.last_name),
            (&self.student_id, &mut profile.student_id),
            (&self.company_name, &mut profile.company_name),
            (&self.position, &mut profile.position),
            (&self.start_date, &mut profile.start_date),
            (&self.end_date, &mut profile.end_date),
            (&self.supervisor_name, &mut profile.supervisor_name),
            (&self.supervisor_position, &mut profile.supervisor_position),
            (&self.department, &mut profile.department),
        ];

        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
    }
}
