pub(crate) mod bridge;
pub(crate) mod component;
pub(crate) mod config;
pub(crate) mod net;
pub(crate) mod page;
pub(crate) mod sys;

use crate::page::*;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Copy, Routable, PartialEq)]
enum Route {
    #[at("/")]
    Portal,
    #[at("/config")]
    Config,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Portal => html! { <PortalPage /> },
        Route::Config => html! { <ConfigPage /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Portal} /> },
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
