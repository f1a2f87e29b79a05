pub mod center;
pub mod global_context;
pub mod left;
pub mod side_panel;
pub mod tabs;

pub use side_panel::{SidePanel, SidePanelService};

use leptos::prelude::*;

/// Оболочка приложения: меню справочников слева, табы справа.
///
/// ```text
/// +-----------+------------------------------+
/// |  Sidebar  |    Tabs                      |
/// |   (Left)  |    (Center)                  |
/// +-----------+------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <div class="app-body">
                <left::Left>{children()}</left::Left>
                <div class="app-main">
                    <center::Center />
                </div>
            </div>
        </div>
    }
}
