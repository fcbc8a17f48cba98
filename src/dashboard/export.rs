//! CSV Export
//!
//! Writes the (already filtered) lead and bank connection sets as CSV.

use std::io::Write;

use crate::infrastructure::driving_adapters::api_rest::dto::{ApplicationResponseDto, BankConnectionResponseDto};

const LEAD_HEADERS: [&str; 16] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Date of Birth",
    "SSN Last 4",
    "Monthly Income",
    "Loan Amount",
    "Employment Status",
    "Bank Account Type",
    "Bank Name",
    "Custom Bank Name",
    "Bank Duration",
    "Submitted At",
    "Status",
];

const BANK_CONNECTION_HEADERS: [&str; 7] = [
    "Name",
    "Phone",
    "Bank",
    "Custom Bank Name",
    "Approved Amount",
    "Submitted At",
    "Status",
];

/// Write leads as CSV with a header row
///
/// # Errors
///
/// Returns `csv::Error` if the underlying writer fails.
pub fn write_leads_csv<W: Write>(writer: W, leads: &[ApplicationResponseDto]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(LEAD_HEADERS)?;

    for lead in leads {
        csv_writer.write_record([
            lead.id.as_str(),
            lead.first_name.as_str(),
            lead.last_name.as_str(),
            lead.email.as_str(),
            lead.phone.as_str(),
            lead.date_of_birth.to_string().as_str(),
            lead.ssn_last_four.as_str(),
            lead.monthly_income.as_str(),
            lead.loan_amount.to_string().as_str(),
            lead.employment_status.as_str(),
            lead.bank_account.as_str(),
            lead.bank_name.as_str(),
            lead.custom_bank_name.as_deref().unwrap_or(""),
            lead.bank_duration.as_str(),
            lead.submitted_at.to_rfc3339().as_str(),
            lead.status.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write bank connections as CSV with a header row
///
/// # Errors
///
/// Returns `csv::Error` if the underlying writer fails.
pub fn write_bank_connections_csv<W: Write>(
    writer: W,
    connections: &[BankConnectionResponseDto],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(BANK_CONNECTION_HEADERS)?;

    for connection in connections {
        csv_writer.write_record([
            connection.name.as_str(),
            connection.phone.as_str(),
            connection.bank_name.as_str(),
            connection.custom_bank_name.as_deref().unwrap_or(""),
            connection.approved_amount.to_string().as_str(),
            connection.submitted_at.to_rfc3339().as_str(),
            connection.status.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::filter::fixtures::lead;
    use crate::domain::models::application::{fixtures, ApplicationStatus};
    use crate::domain::models::bank_connection::BankConnection;

    #[test]
    fn leads_csv_has_header_and_one_row_per_lead() {
        let leads = vec![
            lead("Ann", "Lee", "5551234567", ApplicationStatus::New),
            lead("Bob", "Stone", "5559876543", ApplicationStatus::Approved),
        ];
        let mut out = Vec::new();
        write_leads_csv(&mut out, &leads).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID,First Name,Last Name,Email,Phone"));
        assert!(lines[0].ends_with("Submitted At,Status"));
        assert!(lines[1].contains(",Ann,Lee,"));
        assert!(lines[1].ends_with(",new"));
        assert!(lines[2].contains(",2500,full-time,checking,chase,"));
    }

    #[test]
    fn bank_connections_csv_quotes_commas() {
        let mut data = fixtures::submit_data("Ann", "Lee", "5551234567");
        data.financial.bank_name = "other".to_string();
        data.financial.custom_bank_name = Some("Lakeside, Credit Union".to_string());
        let application = crate::domain::models::application::LoanApplication::new(data);
        let connection = BankConnectionResponseDto::from(BankConnection::placeholder_for(&application));

        let mut out = Vec::new();
        write_bank_connections_csv(&mut out, &[connection]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Name,Phone,Bank,Custom Bank Name,Approved Amount,Submitted At,Status\n"));
        assert!(text.contains("Ann Lee,5551234567,Other,\"Lakeside, Credit Union\",2500,"));
        assert!(text.trim_end().ends_with("approved_pending_bank_setup"));
    }
}
