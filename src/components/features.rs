//! Features Section Component
//!
//! The four feature cards of the landing page, each rendered by the reusable
//! [`Feature`] component.

use leptos::prelude::*;

#[component]
fn Feature(
    icon: &'static str,
    title: &'static str,
    description: &'static str,
) -> impl IntoView {
    view! {
        <div class="feature">
            <div class="feature-icon">
                <span class="material-icons">{icon}</span>
            </div>
            <div>
                <h4 class="feature-title">{title}</h4>
                <p class="feature-description">{description}</p>
            </div>
        </div>
    }
}

#[component]
pub fn FeaturesSection() -> impl IntoView {
    view! {
        <section class="features">
            <h2 class="features-title">"Key Features of Lomi"</h2>
            <p class="features-subtitle">
                "Lomi offers a powerful platform to bring your projects to life with \
                 ease. Discover the core features designed to support your campaign \
                 from start to finish."
            </p>
            <div class="features-grid">
                <Feature
                    icon="monitor_heart"
                    title="Transparent Tracking"
                    description="Monitor your campaign's progress with real-time updates and blockchain transparency, ensuring full visibility and accountability."
                />
                <Feature
                    icon="attach_money"
                    title="Secure Transactions"
                    description="Enjoy secure and seamless financial transactions, thanks to blockchain technology that protects your funds and personal information."
                />
                <Feature
                    icon="support_agent"
                    title="Comprehensive Support"
                    description="Access extensive resources and support throughout your campaign, ensuring you have the tools and guidance needed for success."
                />
                <Feature
                    icon="groups"
                    title="Community Engagement"
                    description="Build and engage with a community of backers who are passionate about your project, fostering collaboration and support."
                />
            </div>
        </section>
    }
}
