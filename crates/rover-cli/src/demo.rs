use rover_dom::ssr::{self, RenderRequest};
use rover_dom::{el, AbstractNode, Builder, Component, Handler, Props, View, ViewConfig};
use serde::{Deserialize, Serialize};

/// Loader output the demo page expects in `--data`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoData {
    pub title: String,
    pub items: Vec<TodoItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoItem {
    pub label: String,
    pub done: bool,
}

/// Small todo list page: heading, filter links, list and an add form
pub struct TodoPage {
    data: TodoData,
    filter: String,
    owner: Option<String>,
}

impl TodoPage {
    fn visible(&self) -> impl Iterator<Item = &TodoItem> + '_ {
        self.data.items.iter().filter(|item| match self.filter.as_str() {
            "done" => item.done,
            "open" => !item.done,
            _ => true,
        })
    }
}

impl Component for TodoPage {
    fn render(&self, h: &Builder<'_>) -> AbstractNode {
        let title = if self.data.title.is_empty() {
            "Todos"
        } else {
            self.data.title.as_str()
        };

        let filters: Vec<AbstractNode> = ["all", "open", "done"]
            .into_iter()
            .map(|name| {
                let class = (name == self.filter).then_some("active");
                el!(
                    h,
                    "a",
                    Props::new()
                        .set("href", format!("?filter={}", name))
                        .class(class),
                    name
                )
            })
            .collect();

        let items: Vec<AbstractNode> = self
            .visible()
            .enumerate()
            .map(|(index, item)| {
                el!(
                    h,
                    "li",
                    Props::new()
                        .class(item.done.then_some("done"))
                        .data("index", Some(index.to_string())),
                    el!(
                        h,
                        "input",
                        Props::new()
                            .set("type", "checkbox")
                            .checked(item.done)
                            .on("change", Handler::new(|_| {}))
                    ),
                    item.label.as_str()
                )
            })
            .collect();

        el!(
            h,
            "main",
            Props::new().id("todos").class("todo-page"),
            el!(h, "h1", title),
            self.owner
                .as_ref()
                .map(|owner| el!(h, "p", Props::new().class("owner"), format!("Owner: {}", owner))),
            el!(h, "nav", filters),
            el!(h, "ul", Props::new().aria("live", Some("polite")), items),
            el!(
                h,
                "form",
                Props::new().id("add"),
                el!(
                    h,
                    "input",
                    Props::new()
                        .set("name", "label")
                        .set("placeholder", "What needs doing?")
                ),
                el!(h, "br"),
                el!(h, "button", Props::new().set("type", "submit"), "Add")
            )
        )
    }
}

/// View factory handed to the SSR entry point
pub fn make_view(request: &RenderRequest) -> ssr::Result<View<TodoPage>> {
    let data: TodoData = serde_json::from_value(request.data.clone()).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "request data does not match the demo page, using defaults");
        TodoData::default()
    });

    let page = TodoPage {
        data,
        filter: request
            .query
            .get("filter")
            .cloned()
            .unwrap_or_else(|| "all".to_string()),
        owner: request.params.get("owner").cloned(),
    };
    Ok(View::new(ViewConfig::new(request.id.clone()), page)?)
}
