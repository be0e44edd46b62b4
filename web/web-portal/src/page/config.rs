use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

use crate::{component::*, config::portal::PortalConfig, sys::bootstrap::modal::Modal};

#[function_component]
pub fn ConfigPage() -> Html {
    let config = use_state(PortalConfig::default);
    let saved_modal = use_node_ref();

    {
        let config = config.clone();
        use_effect_with((), move |_| {
            config.set(PortalConfig::load_from_localstorage());
        });
    }

    let on_edit_api_base = {
        let config = config.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut new_config = (*config).clone();
            new_config.api_base = Some(input.value());
            config.set(new_config);
        })
    };

    let on_submit = {
        let config = config.clone();
        let saved_modal = saved_modal.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            config.save_to_localstorage();
            if let Some(element) = saved_modal.cast::<Element>() {
                Modal::get_or_create_instance(&element).show();
            }
        })
    };

    html! {
        <>
            <Title title="Settings" />
            <NavBar active="config" />

            <div class="container-sm">
                <h3>{"Local settings"}</h3>

                <form onsubmit={on_submit}>
                    <div class="row mb-3">
                        <label for="api_base" class="col-sm-2 col-form-label">
                            {"API base URL"}
                        </label>
                        <div class="col-sm-10">
                            <input type="url" class="form-control" id="api_base" placeholder="https://portal.example.edu/api"
                                value={config.api_base.clone().unwrap_or_default()} oninput={on_edit_api_base} />
                            <i style="color: gray;">{"Leave empty to use the API served by this site (/api)."}</i>
                        </div>
                    </div>

                    <button type="submit" class="btn btn-primary">
                        {"Save"}
                    </button>
                </form>

                <div class="modal fade" tabindex="-1" ref={saved_modal}>
                    <div class="modal-dialog">
                        <div class="modal-content">
                            <div class="modal-header">
                                <h5 class="modal-title">{"Settings"}</h5>
                                <button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"></button>
                            </div>
                            <div class="modal-body">
                                {"Settings saved. They apply the next time the events page is opened."}
                            </div>
                            <div class="modal-footer">
                                <button type="button" data-bs-dismiss="modal" class="btn btn-primary">{"OK"}</button>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </>
    }
}
