//! Todo Demonstration
//!
//! Builds the todo app, mounts it into a page and replays a short session of
//! user events, printing the page after each step.
//!
//! Run with `RUST_LOG=sprout_core=trace` to see every set, effect and
//! dispatch.

use sprout_core::dom::{mount_by_id, Event};
use sprout_core::h;
use sprout_core::todo::{App, REMOVE_LABEL};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let page = h!("body", {}, h!("div", { "id" => "app" }));
    let app = App::new();
    mount_by_id(&page, "app", app.root())?;
    println!("Mounted:\n  {page}\n");

    for text in ["buy milk", "walk the dog"] {
        app.submit(text);
        println!("Added {text:?}:\n  {page}\n");
    }

    let first = app.rows()[0].clone();
    if let Some(checkbox) = first.find_all_by_tag("input").first() {
        checkbox.dispatch(&Event::new("change"));
    }
    println!("Toggled \"buy milk\":\n  {page}\n");

    let second = app.rows()[1].clone();
    second.dispatch(&Event::new("mouseenter"));
    println!("Hovering \"walk the dog\":\n  {page}\n");

    // The innermost span carries the click listener; its `show` container
    // has the same text
    let action = second
        .find_all_by_tag("span")
        .into_iter()
        .find(|span| span.child_elements().is_empty() && span.text_content() == REMOVE_LABEL)
        .ok_or("remove action not rendered")?;
    action.dispatch(&Event::new("click"));
    println!("Removed \"walk the dog\":\n  {page}\n");

    println!("Remaining todos: {:?}", app.todos().cur());
    Ok(())
}
