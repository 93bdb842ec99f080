use leptos::*;

/// Password input with a show/hide toggle.
#[component]
pub fn PasswordField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] autocomplete: Option<String>,
) -> impl IntoView {
    let visible = create_rw_signal(false);
    let label_for = id.clone();
    let input_name = id.clone();
    let placeholder = label.clone();

    view! {
        <div class="relative">
            <label for=label_for class="sr-only">{label}</label>
            <input
                id=id
                name=input_name
                type=move || if visible.get() { "text" } else { "password" }
                autocomplete=autocomplete.unwrap_or_else(|| "new-password".to_string())
                required
                disabled=move || disabled.get()
                class="appearance-none rounded-md relative block w-full px-3 py-2 pr-16 border border-form-control-border bg-form-control-bg placeholder-form-control-placeholder text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus focus:border-action-primary-border focus:z-10 sm:text-sm"
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <button
                type="button"
                class="absolute inset-y-0 right-0 z-20 px-3 text-xs font-medium text-fg-muted hover:text-fg"
                aria-label=move || if visible.get() { "Hide password" } else { "Show password" }
                on:click=move |_| visible.update(|v| *v = !*v)
            >
                {move || if visible.get() { "Hide" } else { "Show" }}
            </button>
        </div>
    }
}
