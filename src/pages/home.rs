//! Home Page - hero and feature sections under the navbar

use leptos::prelude::*;

use crate::components::{FeaturesSection, HeroSection};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main class="page">
            <HeroSection/>
            <FeaturesSection/>
        </main>
    }
}
