#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io;
use unified_errors::{
    DataAccessFault, DispatchPolicy, Environment, InMemoryCatalog, MessageResolver,
    TransportCategory, TransportFault, ValidationFailure, Violation,
};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let text = String::from_utf8_lossy(rest).into_owned();

    let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
    let environment = if selector & 0x80 != 0 {
        Environment::Production
    } else {
        Environment::parse("dev")
    };
    let policy = DispatchPolicy::new(resolver).with_environment(environment);

    let categories = TransportCategory::REGISTERED;
    let envelope = match selector % 4 {
        0 => {
            let category = categories[usize::from(selector) % categories.len()].clone();
            policy.classify(&TransportFault::new(category, text))
        }
        1 => policy.classify(&ValidationFailure::new().with(Violation::field("f", text))),
        2 => policy.classify(&DataAccessFault::other(text)),
        _ => policy.classify(&io::Error::other(text)),
    };

    assert!(!envelope.full_code().is_empty());
    assert!(!envelope.message().is_empty());
});
