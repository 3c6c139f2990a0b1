use serde::Serialize;
use unified_errors::{
    args, definitions, DispatchPolicy, Environment, InMemoryCatalog, MessageResolver, Result,
};

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: &'static str,
}

fn find_user(resolver: &MessageResolver, id: u32) -> Result<User> {
    let found = (id == 7).then_some(User { id, name: "ana" });
    resolver
        .guard(&definitions::RECORD_NOT_FOUND)
        .assert_not_null(found, args![id])
}

fn main() {
    let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
    let policy = DispatchPolicy::new(resolver.clone()).with_environment(Environment::Production);

    println!("--- Basic Usage Example ---\n");

    for id in [7, 42] {
        let envelope = policy.respond(find_user(&resolver, id));
        match serde_json::to_string(&envelope) {
            Ok(json) => println!("GET /users/{id} -> {json}"),
            Err(err) => println!("GET /users/{id} -> serialization failed: {err}"),
        }
    }
    // GET /users/7 -> {"fullCode":"COM-SYS-200","message":"Success","data":{"id":7,"name":"ana"}}
    // GET /users/42 -> {"fullCode":"COM-DB-604","message":"Record 42 not found."}
}
