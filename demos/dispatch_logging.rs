//! Every dispatch branch, with its log line printed by a `tracing` subscriber.

use std::io;
use unified_errors::{
    DataAccessFault, DispatchPolicy, Environment, InMemoryCatalog, MessageResolver,
    TransportCategory, TransportFault, ValidationFailure, Violation,
};

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");

    for environment in [Environment::parse("dev"), Environment::Production] {
        println!("\n--- APP_ENV={environment} ---");
        let policy = DispatchPolicy::new(resolver.clone()).with_environment(environment);

        let faults: Vec<Box<dyn std::error::Error + Send + Sync>> = vec![
            Box::new(TransportFault::new(
                TransportCategory::MethodNotSupported,
                "Request method 'DELETE' not supported",
            )),
            Box::new(
                ValidationFailure::new()
                    .with(Violation::field("email", "must be a well-formed address"))
                    .with(Violation::object("passwords do not match")),
            ),
            Box::new(DataAccessFault::duplicate_key("duplicate key value violates users_email_key")),
            Box::new(io::Error::other("connection reset by peer")),
        ];

        for fault in &faults {
            let envelope = policy.classify(fault.as_ref());
            println!("{} {}", envelope.full_code(), envelope.message());
        }
    }
}
