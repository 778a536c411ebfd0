//! Text rendering for the contact book commands.

use pocket_core::contacts::{Contact, ContactError};

pub const EMPTY_LIST: &str = "No contacts found.";
pub const ADDED: &str = "Contact added successfully!";

/// One card per contact: name on the first line, phone on the second,
/// cards separated by a blank line. A failed load is shown in place of the
/// list.
pub fn render_contact_list(result: &Result<Vec<Contact>, ContactError>) -> String {
    match result {
        Ok(contacts) if contacts.is_empty() => EMPTY_LIST.to_string(),
        Ok(contacts) => contacts
            .iter()
            .map(|c| format!("{}\n{}", c.name, c.phone))
            .collect::<Vec<_>>()
            .join("\n\n"),
        Err(e) => format!("Error loading contacts: {e}"),
    }
}

/// Status line after an add attempt.
pub fn render_add_outcome(result: &Result<(), ContactError>) -> String {
    match result {
        Ok(()) => ADDED.to_string(),
        Err(ContactError::MissingField(_)) => "Please fill in all fields".to_string(),
        Err(ContactError::Rejected(body)) => format!("Failed to add contact: {body}"),
        Err(e) => format!("Error adding contact: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_list_message() {
        assert_eq!(render_contact_list(&Ok(Vec::new())), "No contacts found.");
    }

    #[test]
    fn list_renders_cards() {
        let contacts = vec![
            Contact::new("Ada", "555-0100"),
            Contact::new("Grace", "555-0101"),
        ];

        assert_eq!(
            render_contact_list(&Ok(contacts)),
            "Ada\n555-0100\n\nGrace\n555-0101"
        );
    }

    #[test]
    fn list_failure_is_shown_inline() {
        let result = Err(ContactError::Transport("connection refused".to_string()));

        assert_eq!(
            render_contact_list(&result),
            "Error loading contacts: Transport error: connection refused"
        );
    }

    #[test]
    fn add_outcomes() {
        assert_eq!(render_add_outcome(&Ok(())), "Contact added successfully!");
        assert_eq!(
            render_add_outcome(&Err(ContactError::MissingField("name"))),
            "Please fill in all fields"
        );
        assert_eq!(
            render_add_outcome(&Err(ContactError::Rejected("0".to_string()))),
            "Failed to add contact: 0"
        );
        assert_eq!(
            render_add_outcome(&Err(ContactError::Transport("timed out".to_string()))),
            "Error adding contact: Transport error: timed out"
        );
    }
}
