//! Job postings.

use crate::id::{RemoteId, deserialize_id};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RemoteId,
    pub title: String,
    #[serde(default, alias = "company_name")]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "type", alias = "job_type")]
    pub job_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl JobPosting {
    /// Case-insensitive match on title, description and skill names.
    /// An empty term matches every posting.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self
                .skills
                .iter()
                .any(|skill| skill.name.to_lowercase().contains(&term))
    }

    /// Description with escaped `\r\n` sequences flattened to spaces.
    pub fn description_text(&self) -> String {
        self.description
            .replace("\\r\\n", " ")
            .replace("\r\n", " ")
    }

    /// First `limit` skill names and how many were left out.
    pub fn skill_preview(&self, limit: usize) -> (Vec<&str>, usize) {
        let shown: Vec<&str> = self
            .skills
            .iter()
            .take(limit)
            .map(|s| s.name.as_str())
            .collect();
        let hidden = self.skills.len().saturating_sub(shown.len());
        (shown, hidden)
    }

    /// Context line sent to the question generator.
    pub fn interview_context(&self) -> String {
        format!(
            "Job title: {}, Job description: {}",
            self.title, self.description
        )
    }
}

/// Filters postings by a search term, preserving order.
pub fn filter_jobs<'a>(jobs: &'a [JobPosting], term: &str) -> Vec<&'a JobPosting> {
    jobs.iter().filter(|job| job.matches(term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting() -> JobPosting {
        serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Backend Engineer",
            "company_name": "Acme",
            "description": "Build APIs\\r\\nwith Django",
            "skills": [{"name": "Python"}, {"name": "SQL"}, {"name": "Docker"}, {"name": "Rust"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let job = posting();
        assert_eq!(job.id, "4");
        assert_eq!(job.company, "Acme");
        assert!(job.location.is_empty());
        assert_eq!(job.description_text(), "Build APIs with Django");
    }

    #[test]
    fn test_search_matches_title_description_and_skills() {
        let job = posting();
        assert!(job.matches(""));
        assert!(job.matches("backend"));
        assert!(job.matches("DJANGO"));
        assert!(job.matches("docker"));
        assert!(!job.matches("kotlin"));
    }

    #[test]
    fn test_skill_preview() {
        let job = posting();
        let (shown, hidden) = job.skill_preview(3);
        assert_eq!(shown, vec!["Python", "SQL", "Docker"]);
        assert_eq!(hidden, 1);
    }

    #[test]
    fn test_filter_jobs() {
        let mut other = posting();
        other.id = "5".to_string();
        other.title = "Data Analyst".to_string();
        other.description = String::new();
        other.skills.clear();

        let jobs = vec![posting(), other];
        assert_eq!(filter_jobs(&jobs, "analyst").len(), 1);
        assert_eq!(filter_jobs(&jobs, " ").len(), 2);
    }
}
