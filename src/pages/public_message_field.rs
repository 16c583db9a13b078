use leptos::*;
use crate::core::constants::{FIELD_PUBLIC_MESSAGE, PUBLIC_MESSAGE_LIMIT};

/// Characters left in the public message budget; negative once exceeded
pub fn remaining_message_chars(message: &str) -> i64 {
    PUBLIC_MESSAGE_LIMIT - message.chars().count() as i64
}

#[component]
pub fn PublicMessageField() -> impl IntoView {
    let (remaining, set_remaining) = create_signal(PUBLIC_MESSAGE_LIMIT);

    view! {
        <div class="form-group public-message-field">
            <div class="label-row">
                <label for=FIELD_PUBLIC_MESSAGE>
                    "A message for the community "
                    <span class="optional">"- Optional"</span>
                </label>
                <span class="char-counter" class:over-limit=move || remaining.get() < 0>
                    {remaining}
                </span>
            </div>
            <textarea
                id=FIELD_PUBLIC_MESSAGE
                name=FIELD_PUBLIC_MESSAGE
                class="form-input"
                rows="4"
                placeholder="This will be public and it is also optional"
                on:input=move |ev| set_remaining.set(remaining_message_chars(&event_target_value(&ev)))
            ></textarea>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_chars() {
        assert_eq!(remaining_message_chars(""), 140);
        assert_eq!(remaining_message_chars("thanks!"), 133);
        assert_eq!(remaining_message_chars("merci à vous"), 128);
        assert_eq!(remaining_message_chars(&"x".repeat(150)), -10);
    }
}
