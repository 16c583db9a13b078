use leptos::*;
use web_sys::{FormData, HtmlFormElement};

use crate::core::api::{PledgeApi, RemoteApi};
use crate::core::config::AppSettings;
use crate::core::constants::*;
use crate::core::order::{submit_pledge, PledgeError, PledgeForm, TargetCollective, DEFAULT_INTERVAL, FREQUENCY_OPTIONS};
use crate::core::pledge::{LoginStatus, PledgeViewState};
use crate::core::router::{BrowserRouter, PageParams};
use crate::core::session::load_logged_in_user;
use crate::core::slug::slugify;
use crate::pages::amount_field::AmountField;
use crate::pages::public_message_field::PublicMessageField;

// Read the submitted form's fields by element name
fn read_pledge_form(form: &HtmlFormElement) -> Result<PledgeForm, PledgeError> {
    let data = FormData::new_with_form(form)
        .map_err(|e| {
            log::error!("Failed to read pledge form: {:?}", e);
            PledgeError::UnreadableForm(format!("{:?}", e))
        })?;

    Ok(PledgeForm::from_fields(|name| data.get(name).as_string()))
}

#[component]
pub fn CreatePledgePage(params: PageParams) -> impl IntoView {
    let settings = AppSettings::load();
    let api = RemoteApi::new(&settings);
    let website_base = settings.website_base();

    let state = create_rw_signal(PledgeViewState::new());
    let target = create_rw_signal(TargetCollective::from_slug(params.slug.as_deref()));
    let is_new_collective = target.get_untracked().is_new();

    // load the session on mount
    {
        let api = api.clone();
        spawn_local(async move {
            let user = load_logged_in_user(Some(&api)).await;
            state.update(|s| s.finish_session_load(user));
        });
    }

    // resolve the existing collective given on the page
    if let Some(slug) = params.slug.clone() {
        let api = api.clone();
        spawn_local(async move {
            match api.collective_id_by_slug(&slug).await {
                Ok(id) => {
                    log::info!("Collective {} resolved to id {}", slug, id);
                    target.set(TargetCollective::Existing { slug, id: Some(id) });
                }
                Err(e) => log::error!("Failed to resolve collective {}: {}", slug, e),
            }
        });
    }

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        if !state.try_update(|s| s.begin_submission()).unwrap_or(false) {
            log::warn!("Pledge already being submitted, ignoring");
            return;
        }

        let form = match read_pledge_form(&event_target::<HtmlFormElement>(&ev)) {
            Ok(form) => form,
            Err(e) => {
                state.update(|s| s.finish_submission::<()>(&Err(e)));
                return;
            }
        };
        let target = target.get_untracked();
        let api = api.clone();

        spawn_local(async move {
            let result = submit_pledge(&api, &BrowserRouter, &form, &target).await;
            if let Err(e) = &result {
                log::error!("Failed to create pledge: {}", e);
            }
            state.update(|s| s.finish_submission(&result));
        });
    };

    let currency = Signal::derive(move || state.with(|s| s.currency()));
    // only changes once, when the session load finishes
    let login_status = create_memo(move |_| state.with(|s| s.login_status()));
    let name = params.name.clone();

    view! {
        <div class="create-pledge-page">
            <header
                class="page-header"
                class:loading=move || login_status.get() == LoginStatus::Loading
            >
                <span class="page-header-title">"Make a Pledge"</span>
                <Show when=move || state.with(|s| s.is_logged_in())>
                    <span class="page-header-user">
                        {move || state.with(|s| {
                            s.logged_in_user()
                                .map(|user| user.collective.name.clone())
                                .unwrap_or_default()
                        })}
                    </span>
                </Show>
            </header>

            <div class="pledge-layout">
                <section class="pledge-intro">
                    <h1 class="page-title">
                        "Make a pledge "
                        {(!name.is_empty()).then(|| view! {
                            <span>"to " <strong>{name.clone()}</strong></span>
                        })}
                    </h1>

                    <p class="intro-text">
                        "If the cause or collective that you want to support is not yet on the platform, \
                        you can make a pledge. This will incentivize them to create a collective for \
                        their activities and offer you much more visibility on how your money is spent \
                        to advance their cause."
                    </p>

                    <p class="intro-text">
                        "Once they create it (and verify that they own the URL you'll enter in this form), \
                        you will receive an email to ask you to fulfill your pledge."
                    </p>
                </section>

                <section class="pledge-form-section">
                    <form class="pledge-form" on:submit=on_submit>
                        <div class="form-block">
                            <h2>"Pledge as:"</h2>

                            {move || match login_status.get() {
                                LoginStatus::Loading => view! {
                                    <p class="helper-text">"Loading profile..."</p>
                                }.into_view(),
                                LoginStatus::LoggedOut => view! {
                                    <p class="helper-text">"Sign up or login to create a pledge."</p>
                                }.into_view(),
                                LoginStatus::LoggedIn => {
                                    let default_id = state.with_untracked(|s| {
                                        s.logged_in_user().map(|user| user.default_profile_id())
                                    });
                                    view! {
                                        <div class="form-group">
                                            <label for=FIELD_FROM_COLLECTIVE>"Choose a profile"</label>
                                            <select id=FIELD_FROM_COLLECTIVE name=FIELD_FROM_COLLECTIVE>
                                                {state.with_untracked(|s| s.profiles())
                                                    .into_iter()
                                                    .map(|profile| {
                                                        let id = profile.collective.id;
                                                        view! {
                                                            <option value=id.to_string() selected={Some(id) == default_id}>
                                                                {profile.collective.name}
                                                            </option>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </select>
                                        </div>
                                    }.into_view()
                                }
                            }}
                        </div>

                        <div class="form-block">
                            <h2>"Pledge details:"</h2>

                            <AmountField currency=currency />

                            <div class="form-group">
                                <label for=FIELD_INTERVAL>"Frequency"</label>
                                <select id=FIELD_INTERVAL name=FIELD_INTERVAL>
                                    {FREQUENCY_OPTIONS
                                        .iter()
                                        .map(|option| view! {
                                            <option
                                                value=option.form_value()
                                                selected={option.value == Some(DEFAULT_INTERVAL)}
                                            >
                                                {option.label}
                                            </option>
                                        })
                                        .collect_view()}
                                </select>
                            </div>

                            <PublicMessageField />
                        </div>

                        {is_new_collective.then(|| view! {
                            <div class="form-block new-collective">
                                <h2>"Details of the new collective:"</h2>
                                <p class="first-pledger">"You are the first pledger!"</p>
                                <p class="helper-text">
                                    "You've earned the privilege to name and describe this awesome cause. \
                                    We'll create a pledged collective page for it so other people can find \
                                    it and pledge to it too."
                                </p>

                                <div class="form-row">
                                    <div class="form-group">
                                        <label for=FIELD_NAME>"Name"</label>
                                        <input
                                            type="text"
                                            id=FIELD_NAME
                                            name=FIELD_NAME
                                            class="form-input"
                                            value=params.name.clone()
                                        />
                                    </div>

                                    <div class="form-group">
                                        <label for=FIELD_SLUG>"Collective URL"</label>
                                        <div class="input-group">
                                            <span class="input-prepend">{website_base}</span>
                                            <input
                                                type="text"
                                                id=FIELD_SLUG
                                                name=FIELD_SLUG
                                                class="form-input"
                                                value=slugify(&params.name)
                                            />
                                        </div>
                                    </div>
                                </div>

                                <div class="form-group">
                                    <label for=FIELD_WEBSITE>"GitHub URL - More collective types soon!"</label>
                                    <div class="input-group">
                                        <span class="input-prepend">"https://"</span>
                                        <input
                                            type="text"
                                            id=FIELD_WEBSITE
                                            name=FIELD_WEBSITE
                                            class="form-input"
                                            placeholder="i.e. github.com/babel/babel"
                                        />
                                    </div>
                                </div>
                            </div>
                        })}

                        <input
                            type="submit"
                            class="submit-btn"
                            value=move || if state.with(|s| s.is_submitting()) { "Pledging..." } else { "Make Pledge" }
                            prop:disabled=move || !state.with(|s| s.can_submit())
                        />
                    </form>

                    <Show when=move || state.with(|s| s.error_message().is_some())>
                        <p class="error-message">
                            {move || state.with(|s| s.error_message().unwrap_or_default().to_string())}
                        </p>
                    </Show>
                </section>
            </div>

            <footer class="page-footer">
                <span>"Pledges are fulfilled once the collective joins the platform."</span>
            </footer>
        </div>
    }
}
