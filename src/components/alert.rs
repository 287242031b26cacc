use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// How long a failure alert stays on screen before auto-dismissing.
const ALERT_TIMEOUT_MS: u32 = 5_000;

#[derive(Properties, PartialEq, Clone)]
pub struct AlertProps {
    pub message: String,
    pub on_dismiss: Callback<()>,
}

/// Dismissible timed alert for solve failures. Clicking it dismisses early;
/// otherwise it goes away on its own.
#[function_component]
pub fn Alert(props: &AlertProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.message.clone(), move |_| {
            let timeout = Timeout::new(ALERT_TIMEOUT_MS, move || on_dismiss.emit(()));
            move || drop(timeout)
        });
    }
    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };
    html! {
        <div {onclick}
            style="position:fixed; top:16px; right:16px; max-width:360px; background:#fff1f0; \
                   border:1px solid #d1242f; color:#d1242f; border-radius:8px; padding:10px 14px; \
                   font-size:14px; cursor:pointer; box-shadow:0 4px 12px rgba(0,0,0,0.15);">
            { props.message.clone() }
        </div>
    }
}
