use leptos::*;
use crate::core::constants::{DEFAULT_AMOUNT, FIELD_TOTAL_AMOUNT, PRESET_AMOUNTS};

/// Preset amount buttons plus a custom input sharing one value.
#[component]
pub fn AmountField(
    /// Currency of the logged in user, shown in the label
    currency: Signal<Option<String>>,
) -> impl IntoView {
    let (amount, set_amount) = create_signal(DEFAULT_AMOUNT.to_string());

    let label = move || match currency.get() {
        Some(code) => format!("Amount ({})", code),
        None => "Amount".to_string(),
    };

    view! {
        <div class="amount-field">
            <div class="form-group">
                <label for="presetAmount">{label}</label>
                <div class="button-group" id="presetAmount">
                    {PRESET_AMOUNTS
                        .iter()
                        .map(|preset| {
                            let value = preset.to_string();
                            let selected_value = value.clone();
                            view! {
                                <button
                                    type="button"
                                    class="preset-btn"
                                    class:selected=move || amount.get() == selected_value
                                    on:click=move |_| set_amount.set(value.clone())
                                >
                                    {*preset}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="form-group">
                <label for=FIELD_TOTAL_AMOUNT>"Custom"</label>
                <input
                    type="text"
                    inputmode="decimal"
                    id=FIELD_TOTAL_AMOUNT
                    name=FIELD_TOTAL_AMOUNT
                    class="form-input amount-input"
                    prop:value=amount
                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                />
            </div>
        </div>
    }
}
