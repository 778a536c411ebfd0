//! Command handlers shared by the `pocket` binary and its tests.

use pocket_core::auth::{LoginOutcome, check_credentials};
use pocket_core::contacts::{
    ContactClientRegistry, ContactError, ContactRepository, InMemoryContactClientFactory,
    NewContact,
};
use pocket_core::search::SearchQuery;
use pocket_http::HttpContactClientFactory;
use tracing::info;

use crate::contacts_view::{render_add_outcome, render_contact_list};

/// Registry with every contact backend this binary knows about.
pub fn build_registry() -> ContactClientRegistry {
    ContactClientRegistry::new()
        .with(HttpContactClientFactory)
        .with(InMemoryContactClientFactory)
}

/// Loads the contact list, optionally filtered by name, and renders it.
pub async fn list_contacts(
    repo: &dyn ContactRepository,
    search: Option<&str>,
) -> String {
    let result = repo.list_contacts().await.map(|contacts| match search {
        Some(raw) => SearchQuery::new(raw).filter(contacts, |c| c.name.as_str()),
        None => contacts,
    });
    render_contact_list(&result)
}

/// Adds a contact from raw form input.
///
/// Returns whether the add succeeded and the text to show: the status line,
/// followed by the reloaded list on success.
pub async fn add_contact(
    repo: &dyn ContactRepository,
    name: &str,
    phone: &str,
) -> (bool, String) {
    let result: Result<(), ContactError> = match NewContact::new(name, phone) {
        Ok(contact) => repo.add_contact(&contact).await,
        Err(e) => Err(e),
    };
    let status = render_add_outcome(&result);

    if result.is_ok() {
        info!(name = name.trim(), "contact added");
        let list = list_contacts(repo, None).await;
        (true, format!("{status}\n\n{list}"))
    } else {
        (false, status)
    }
}

/// Runs the login check and renders its status line, coloured when `ansi`
/// is set.
pub fn login(
    username: &str,
    password: &str,
    ansi: bool,
) -> (LoginOutcome, String) {
    let outcome = check_credentials(username, password);
    let text = if ansi {
        paint(outcome.message(), outcome.color())
    } else {
        outcome.message().to_string()
    };
    (outcome, text)
}

/// Wraps `text` in a 24-bit ANSI foreground colour given as `#rrggbb`.
/// Malformed colours leave the text unchanged.
fn paint(
    text: &str,
    hex: &str,
) -> String {
    let rgb = hex
        .strip_prefix('#')
        .filter(|digits| digits.len() == 6)
        .and_then(|digits| {
            let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        });

    match rgb {
        Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pocket_core::contacts::{Contact, InMemoryContactRepository};
    use pretty_assertions::assert_eq;

    use super::*;

    fn book() -> InMemoryContactRepository {
        InMemoryContactRepository::with_contacts(vec![
            Contact::new("Ada Lovelace", "555-0100"),
            Contact::new("Grace Hopper", "555-0101"),
        ])
    }

    #[test]
    fn registry_knows_both_backends() {
        assert_eq!(build_registry().backend_names(), vec!["http", "memory"]);
    }

    #[tokio::test]
    async fn list_without_search_shows_everyone() {
        let text = list_contacts(&book(), None).await;

        assert_eq!(text, "Ada Lovelace\n555-0100\n\nGrace Hopper\n555-0101");
    }

    #[tokio::test]
    async fn list_with_search_filters_by_name() {
        let text = list_contacts(&book(), Some(" HOPPER ")).await;

        assert_eq!(text, "Grace Hopper\n555-0101");
    }

    #[tokio::test]
    async fn search_without_hits_reads_as_empty() {
        let text = list_contacts(&book(), Some("turing")).await;

        assert_eq!(text, "No contacts found.");
    }

    #[tokio::test]
    async fn add_reloads_the_list() {
        let repo = InMemoryContactRepository::new();

        let (ok, text) = add_contact(&repo, " Alan ", "555-0199").await;

        assert!(ok);
        assert_eq!(text, "Contact added successfully!\n\nAlan\n555-0199");
    }

    #[tokio::test]
    async fn add_with_empty_field_adds_nothing() {
        let repo = InMemoryContactRepository::new();

        let (ok, text) = add_contact(&repo, "Alan", "  ").await;

        assert!(!ok);
        assert_eq!(text, "Please fill in all fields");
        assert!(repo.list_contacts().await.unwrap().is_empty());
    }

    #[test]
    fn login_plain_text() {
        let (outcome, text) = login("Bond", "007", false);

        assert!(outcome.is_accepted());
        assert_eq!(text, "Correct. Logging you in...");
    }

    #[test]
    fn login_rejection_is_painted_red() {
        let (outcome, text) = login("Bond", "wrong", true);

        assert!(!outcome.is_accepted());
        assert_eq!(
            text,
            "\x1b[38;2;255;76;76mUsername or password are incorrect\x1b[0m"
        );
    }

    #[test]
    fn paint_ignores_malformed_colors() {
        assert_eq!(paint("hi", "00ff00"), "hi");
        assert_eq!(paint("hi", "#0f0"), "hi");
        assert_eq!(paint("hi", "#zzzzzz"), "hi");
    }
}
