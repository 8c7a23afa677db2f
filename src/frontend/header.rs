use super::dom;
use crate::theme::Theme;
use wasm_bindgen::JsCast;
use web_sys::Node;
use yew::prelude::*;

pub const NAV_LINKS: [(&str, &str); 5] = [
    ("#home", "Home"),
    ("#about", "About"),
    ("#skills", "Skills"),
    ("#projects", "Projects"),
    ("#contact", "Contact"),
];

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub theme: Theme,
    pub on_toggle_theme: Callback<()>,
    pub active_link: Option<AttrValue>,
    pub scrolled: bool,
    pub hidden: bool,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu_open = use_state_eq(|| false);
    let menu_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    {
        let menu_open = menu_open.setter();
        let menu_ref = menu_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with((), move |_| {
            let listener = dom::document().and_then(|document| {
                dom::listen(&document, "click", move |event| {
                    let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                        return;
                    };
                    let inside = |node_ref: &NodeRef| {
                        node_ref
                            .get()
                            .is_some_and(|node| node.contains(Some(&target)))
                    };
                    if !inside(&menu_ref) && !inside(&toggle_ref) {
                        menu_open.set(false);
                    }
                })
            });
            let listener = dom::report("mobile menu outside-click", listener);
            move || drop(listener)
        });
    }

    let on_menu_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let on_theme_click = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| on_toggle_theme.emit(()))
    };

    let header_style = if props.hidden {
        "transform: translateY(-100%)"
    } else {
        "transform: translateY(0)"
    };

    html! {
        <header class={classes!("site-header", props.scrolled.then_some("scrolled"))} style={header_style}>
            <a class="logo" href="#home">{"MKB"}</a>
            <button
                id="menuToggle"
                class="menu-toggle"
                type="button"
                aria-label="Toggle navigation"
                aria-expanded={(*menu_open).to_string()}
                onclick={on_menu_toggle}
                ref={toggle_ref}
            >
                <i class="fas fa-bars" aria-hidden="true"></i>
            </button>
            <ul class={classes!("nav-links", (*menu_open).then_some("show"))} ref={menu_ref}>
                { for NAV_LINKS.iter().enumerate().map(|(index, (href, label))| {
                    let active = props.active_link.as_deref() == Some(*href);
                    let style = (*menu_open).then(|| {
                        format!("animation: fadeInRight {:.1}s forwards", 0.3 + index as f64 * 0.1)
                    });
                    html! {
                        <li style={style}>
                            <a href={*href} class={classes!(active.then_some("active"))}>{*label}</a>
                        </li>
                    }
                }) }
            </ul>
            <button
                id="themeToggle"
                class="theme-toggle"
                type="button"
                aria-label={props.theme.toggle_label()}
                aria-pressed={props.theme.is_dark().to_string()}
                onclick={on_theme_click}
            >
                <i class={props.theme.icon()} aria-hidden="true"></i>
            </button>
        </header>
    }
}
