//! Hero Section Component

use leptos::prelude::*;

#[component]
pub fn HeroSection() -> impl IntoView {
    view! {
        <section class="hero">
            <div class="hero-pill-row">
                <button class="hero-pill">
                    "Explore Live Campaigns"
                    <span class="hero-pill-icon">"↗"</span>
                </button>
            </div>
            <h1 class="hero-title">"Join Hands, Share the Load, Create Change"</h1>
            <p class="hero-subtitle">
                "Lomi empowers collective success, harness the power of community to fund \
                 your vision, contribute to others, and track progress transparently on \
                 the blockchain."
            </p>
            <button class="btn btn-cta">
                "Start Your Campaign"
                <span class="btn-icon">"→"</span>
            </button>
        </section>
    }
}
