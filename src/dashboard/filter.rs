//! Client-side Lead Filtering
//!
//! Pure functions over the last fetched snapshot. Filtering never touches
//! stored state, and applying the same filter twice gives the same result.

use crate::domain::models::application::ApplicationStatus;
use crate::infrastructure::driving_adapters::api_rest::dto::ApplicationResponseDto;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    /// Case-insensitive match on first name, last name or email; substring match on phone
    pub search: Option<String>,
    pub status: Option<ApplicationStatus>,
}

impl LeadFilter {
    #[must_use]
    pub fn matches(&self, lead: &ApplicationResponseDto) -> bool {
        self.matches_status(lead) && self.matches_search(lead)
    }

    /// Leads passing the filter, in their original order
    #[must_use]
    pub fn apply(&self, leads: &[ApplicationResponseDto]) -> Vec<ApplicationResponseDto> {
        leads.iter().filter(|lead| self.matches(lead)).cloned().collect()
    }

    fn matches_status(&self, lead: &ApplicationResponseDto) -> bool {
        self.status.map_or(true, |status| lead.status == status.as_str())
    }

    fn matches_search(&self, lead: &ApplicationResponseDto) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };

        let needle = term.to_lowercase();
        let text_match = [&lead.first_name, &lead.last_name, &lead.email]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        if text_match || lead.phone.contains(term) {
            return true;
        }

        let digits: String = term.chars().filter(char::is_ascii_digit).collect();
        !digits.is_empty() && lead.phone.chars().filter(char::is_ascii_digit).collect::<String>().contains(&digits)
    }
}

/// Per-status counts over a set of leads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub new: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn tally(leads: &[ApplicationResponseDto]) -> Self {
        leads.iter().fold(Self::default(), |mut counts, lead| {
            counts.total += 1;
            match lead.status.parse::<ApplicationStatus>() {
                Ok(ApplicationStatus::New) => counts.new += 1,
                Ok(ApplicationStatus::Pending) => counts.pending += 1,
                Ok(ApplicationStatus::Approved) => counts.approved += 1,
                Ok(ApplicationStatus::Rejected) => counts.rejected += 1,
                Err(_) => {}
            }
            counts
        })
    }
}
