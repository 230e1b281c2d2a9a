use leptos::prelude::*;

#[component]
pub fn Intro() -> impl IntoView {
    view! {
        <section class="intro">
            <p>
                "Envie um email em arquivo (.txt ou .pdf) ou cole o texto abaixo. "
                "Cada email é classificado e recebe uma sugestão de resposta."
            </p>
        </section>
    }
}
