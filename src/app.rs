use dioxus::{prelude::*, signals::Signal};

use crate::{
    config::ApiConfig,
    domain::{AppState, HullList, JobParams, TypeId},
    infra::services::Services,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::CalculatorPage,
        shell::Shell,
    },
    util::assets,
};

/// Product and job parameters queued for pricing.
pub type CalcRequest = (TypeId, JobParams);

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Calculator {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let services = use_hook(|| {
        Services::new(&ApiConfig::from_env()).map_err(|err| {
            log::error!("[services] failed to initialise API clients: {err}");
            err.to_string()
        })
    });

    // Pricing trigger set by the calculator form.
    let calc_request = use_signal(|| None::<CalcRequest>);
    use_context_provider(|| calc_request);

    let _hulls = use_resource({
        let services = services.clone();
        move || {
            let services = services.clone();
            async move { load_hull_list(services, state, toasts).await }
        }
    });

    let _breakdown = use_resource({
        let services = services.clone();
        move || {
            let services = services.clone();
            async move { fetch_breakdown(services, state, toasts, calc_request).await }
        }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

async fn load_hull_list(
    services: Result<Services, String>,
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
) -> Option<usize> {
    let services = match services {
        Ok(services) => services,
        Err(err) => {
            state.with_mut(|st| st.hulls = HullList::Failed(err.clone()));
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Failed to initialise API clients: {err}"),
            );
            return None;
        }
    };

    match services.hulls().await {
        Ok(items) => {
            let count = items.len();
            log::info!("[app] loaded {count} battleships");
            state.with_mut(|st| st.hulls = HullList::Ready(items));
            if count == 0 {
                push_toast(toasts, ToastKind::Warning, "No published battleships found.");
            }
            Some(count)
        }
        Err(err) => {
            log::error!("[app] failed to load battleships: {err}");
            state.with_mut(|st| st.hulls = HullList::Failed(err.to_string()));
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Failed to load battleships: {err}"),
            );
            None
        }
    }
}

async fn fetch_breakdown(
    services: Result<Services, String>,
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    mut calc_request: Signal<Option<CalcRequest>>,
) -> Option<TypeId> {
    let Some((type_id, params)) = calc_request() else {
        return None;
    };

    let result = match services {
        Ok(services) => services
            .breakdown(type_id, params)
            .await
            .map_err(|err| err.to_string()),
        Err(err) => Err(format!("Failed to initialise API clients: {err}")),
    };
    calc_request.set(None);

    if let Err(message) = &result {
        log::error!("[app] breakdown for {type_id} failed: {message}");
        push_toast(toasts, ToastKind::Error, message.clone());
    }
    state.with_mut(|st| st.finish_calculation(result));
    Some(type_id)
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}
