use yew::prelude::*;
use yew_router::prelude::*;

const NAV_TITLE: &str = "Campus Events";

#[derive(PartialEq, Properties)]
pub struct NavBarProps {
    pub active: &'static str,
}

#[derive(PartialEq, Clone, Copy)]
struct Item {
    id: &'static str,
    title: &'static str,
    href: crate::Route,
}

const NAV_ITEMS: [Item; 2] = [
    Item {
        id: "portal",
        title: "Events",
        href: crate::Route::Portal,
    },
    Item {
        id: "config",
        title: "Settings",
        href: crate::Route::Config,
    },
];

#[function_component]
pub fn NavBar(props: &NavBarProps) -> Html {
    html! {
        <nav class="navbar navbar-expand-lg navbar-dark bg-primary" style="margin-bottom: 1em;">
            <div class="container-fluid">
                <Link<crate::Route> classes={classes!("navbar-brand")} to={crate::Route::Portal}>{NAV_TITLE}</Link<crate::Route>>
                <button class="navbar-toggler" type="button" data-bs-toggle="collapse" data-bs-target="#navbarNav" aria-controls="navbarNav" aria-expanded="false" aria-label="Menu">
                    <span class="navbar-toggler-icon"></span>
                </button>
                <div class="collapse navbar-collapse" id="navbarNav">
                    <ul class="navbar-nav">
                        {NAV_ITEMS.iter().map(|item| html! {
                            <NavItem item={*item} active={props.active}/>
                        }).collect::<Html>()}
                    </ul>
                </div>
            </div>
        </nav>
    }
}

#[derive(PartialEq, Properties)]
struct NavItemProps {
    item: Item,
    active: &'static str,
}

#[function_component]
fn NavItem(props: &NavItemProps) -> Html {
    let mut link_class = classes!("nav-link");
    if props.item.id == props.active {
        link_class.push("active")
    }
    html! {
        <li class="nav-item">
            <Link<crate::Route> classes={link_class} to={props.item.href}>{props.item.title}</Link<crate::Route>>
        </li>
    }
}
