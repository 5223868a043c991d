use std::process::exit;

use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use whalebooks_client::{Client, ErrorResponse, Result, UserData};

fn print_result<T: Serialize>(label: &str, result: Result<T>) {
    let rendered = match result {
        Ok(value) => serde_json::to_string_pretty(&value),
        Err(err) => serde_json::to_string_pretty(&ErrorResponse::from(err)),
    };
    match rendered {
        Ok(text) => println!("{}:\n{}\n", label, text),
        Err(err) => eprintln!("{}: failed to render result: {}", label, err),
    }
}

/// Expect the API key as the first argument and an optional base URL
/// after. An empty argv still yields a usage line.
fn parse_args<I: Iterator<Item = String>>(
    mut args: I,
) -> std::result::Result<(String, Option<String>), String> {
    let program = args.next().unwrap_or_else(|| "basic_usage".to_string());
    match args.next() {
        Some(api_key) => Ok((api_key, args.next())),
        None => Err(format!("Usage: {} <api_key> [base_url]", program)),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (api_key, raw_url) = match parse_args(std::env::args()) {
        Ok(parsed) => parsed,
        Err(usage) => {
            eprintln!("{}", usage);
            exit(1);
        }
    };

    let mut client = Client::new(api_key);
    if let Some(raw_url) = raw_url {
        let base_url = match url::Url::parse(&raw_url) {
            Ok(url) => url,
            Err(e) => {
                eprintln!("Invalid base URL: {}", e);
                exit(1);
            }
        };
        client = client.with_base_url(base_url.as_str());
    }

    // Get all books
    print_result("Books", client.list_books());

    // Get a book by ID
    print_result("Book 1", client.get_book(1));

    // Create a new user from an untyped mapping
    print_result(
        "Created user",
        client.create_user(&json!({
            "name": "John Doe",
            "email": "john.doe@example.com",
            "role": "admin"
        })),
    );

    // Get a user by ID
    print_result("User 1", client.get_user(1));

    // Update an existing user with the typed payload
    let updated = UserData::new()
        .name("Jane Doe")
        .email("jane.doe@example.com")
        .role("user");
    print_result("Updated user", client.update_user(1, &updated));

    // Delete a user
    print_result("Deleted user", client.delete_user(2));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> std::vec::IntoIter<String> {
        items
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args_empty_argv() {
        assert_eq!(
            parse_args(args(&[])),
            Err("Usage: basic_usage <api_key> [base_url]".to_string())
        );
    }

    #[test]
    fn test_parse_args_missing_key() {
        assert_eq!(
            parse_args(args(&["demo"])),
            Err("Usage: demo <api_key> [base_url]".to_string())
        );
    }

    #[test]
    fn test_parse_args_key_and_url() {
        assert_eq!(
            parse_args(args(&["demo", "key"])),
            Ok(("key".to_string(), None))
        );
        assert_eq!(
            parse_args(args(&["demo", "key", "https://host/api"])),
            Ok(("key".to_string(), Some("https://host/api".to_string())))
        );
    }
}
