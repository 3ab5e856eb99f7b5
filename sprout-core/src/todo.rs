//! Todo Application
//!
//! A small application built on the core: a form to add todos, one row per
//! todo with a checkbox, and a remove action that only appears while the
//! pointer is over the row. It drives every part of the public surface and
//! doubles as the end-to-end scenario for the tests and the demo.
//!
//! Events are dispatched by hand (`submit`, `change`, `mouseenter`,
//! `mouseleave`, `click`), since there is no browser to produce them.
//!
//! Callbacks stored inside rendered rows hold [`WeakSignal`]s of the list.
//! The rows are owned, through the list container, by an effect of that same
//! list, so strong handles there would never be freed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::control_flow::{each, show};
use crate::dom::{build, Attrs, Element, Event, Node};
use crate::h;
use crate::reactive::{Signal, WeakSignal};

/// Placeholder shown in the empty input.
pub const PLACEHOLDER: &str = "What needs to be done?";

/// The remove action label.
pub const REMOVE_LABEL: &str = "❌";

static TODO_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A todo entry.
///
/// Every [`Todo::new`] gets a fresh id; clones keep it. Two todos with the
/// same text are still told apart by their id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: u64,
    pub text: String,
    pub done: bool,
}

impl Todo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TODO_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
            text: text.into(),
            done: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A form with a single text input. Submitting it hands the input's value to
/// `on_add` and clears the input.
pub fn todo_input<F>(on_add: F) -> Element
where
    F: Fn(String) + Send + Sync + 'static,
{
    let text_input = h!("input", { "type" => "text", "placeholder" => PLACEHOLDER });
    let form = h!("form", {}, text_input.clone());

    form.add_event_listener("submit", move |_: &Event| {
        on_add(text_input.value());
        text_input.set_value("");
    });

    form
}

/// A clickable span.
pub fn action_span<F>(text: &str, on_click: F) -> Element
where
    F: Fn() + Send + Sync + 'static,
{
    let span = h!("span", {}, text);
    span.add_event_listener("click", move |_: &Event| on_click());
    span
}

/// One row: checkbox, text and a hover-only remove action.
pub fn todo_item<R, T>(todo: &Todo, on_remove: R, on_toggle: T) -> Element
where
    R: Fn() + Send + Sync + 'static,
    T: Fn() + Send + Sync + 'static,
{
    let mouse_over = Signal::new(false);

    let mut attrs = Attrs::new().with("type", "checkbox");
    if todo.done {
        attrs.set("checked", true);
    }
    let checkbox = build("input", attrs, Vec::<Node>::new());

    let on_remove = Arc::new(on_remove);
    let remove_action = show(&mouse_over, move || {
        let on_remove = on_remove.clone();
        action_span(REMOVE_LABEL, move || on_remove())
    });

    let label = h!(
        "label",
        {},
        checkbox.clone(),
        " ",
        &todo.text,
        " ",
        remove_action,
    );
    label.set_style("opacity", if todo.done { "0.5" } else { "1" });

    let hover = mouse_over.clone();
    label.add_event_listener("mouseenter", move |_: &Event| hover.set(true));
    let hover = mouse_over;
    label.add_event_listener("mouseleave", move |_: &Event| hover.set(false));
    checkbox.add_event_listener("change", move |_: &Event| on_toggle());

    label
}

/// Append a new, not yet done todo.
pub fn add_todo(todos: &Signal<Vec<Todo>>, text: impl Into<String>) {
    let mut next = todos.cur();
    next.push(Todo::new(text));
    todos.set(next);
}

/// Remove every todo with the given text.
pub fn remove_todo(todos: &Signal<Vec<Todo>>, text: &str) {
    let next = todos.with(|list| {
        list.iter()
            .filter(|todo| todo.text != text)
            .cloned()
            .collect::<Vec<_>>()
    });
    todos.set(next);
}

/// Flip the todo with the given id, in place, then re-set the list so the
/// rows are rebuilt.
pub fn toggle_todo(todos: &Signal<Vec<Todo>>, id: u64) {
    todos.update_untracked(|list| {
        if let Some(todo) = list.iter_mut().find(|todo| todo.id == id) {
            todo.done = !todo.done;
        }
    });
    todos.set(todos.cur());
}

/// The whole application: heading, input form and the todo list.
pub struct App {
    root: Element,
    list: Element,
    todos: Signal<Vec<Todo>>,
}

impl App {
    pub fn new() -> Self {
        let todos: Signal<Vec<Todo>> = Signal::new(Vec::new());

        let adder = todos.downgrade();
        let form = todo_input(move |text| {
            with_list(&adder, |todos| add_todo(todos, text));
        });

        let rows = todos.downgrade();
        let list = each(&todos, move |todo: &Todo| {
            let remover = rows.clone();
            let removed = todo.text.clone();
            let toggler = rows.clone();
            let toggled = todo.id();
            todo_item(
                todo,
                move || with_list(&remover, |todos| remove_todo(todos, &removed)),
                move || with_list(&toggler, |todos| toggle_todo(todos, toggled)),
            )
        });

        let root = h!("div", {}, h!("h1", {}, "to do app"), form, list.clone());

        Self { root, list, todos }
    }

    /// The application's root element, ready to be mounted.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The container holding one row per todo.
    pub fn list(&self) -> &Element {
        &self.list
    }

    pub fn todos(&self) -> &Signal<Vec<Todo>> {
        &self.todos
    }

    /// The input form.
    pub fn form(&self) -> Option<Element> {
        self.root.find_all_by_tag("form").into_iter().next()
    }

    /// The rendered rows, in order.
    pub fn rows(&self) -> Vec<Element> {
        self.list.child_elements()
    }

    /// Type `text` into the input and submit the form.
    pub fn submit(&self, text: &str) {
        let Some(form) = self.form() else {
            return;
        };
        if let Some(input) = form.find_all_by_tag("input").first() {
            input.set_value(text);
        }
        form.dispatch(&Event::new("submit"));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn with_list(todos: &WeakSignal<Vec<Todo>>, f: impl FnOnce(&Signal<Vec<Todo>>)) {
    if let Some(todos) = todos.upgrade() {
        f(&todos);
    }
}
