//! Demo analysis content: the loading-screen stages and a deterministic
//! playbook for the completed report.

use dreamtrue_application::AnalysisStage;
use dreamtrue_domain::CompanyData;

/// The rotating loading-screen messages.
const STAGE_MESSAGES: &[&str] = &[
    "Summarizing 200 pages of research so you don't have to.",
    "Spying on competitors (the legal kind).",
    "Connecting dots your competitors didn't even see.",
    "Channeling our inner Sherlock Holmes...",
    "Reading between the lines of market data.",
    "Crafting insights that would make consultants jealous.",
    "Turning data chaos into strategic gold.",
    "Decoding the market matrix...",
    "Building your competitive moat, one insight at a time.",
    "Making sense of the business universe.",
    "Analyzing market trends like a financial detective.",
    "Uncovering hidden opportunities in plain sight.",
    "Translating data into actionable strategies.",
    "Building the perfect strategic roadmap.",
    "Putting the pieces of the market puzzle together.",
];

/// The loading-screen stage rotation, each message shown for
/// `stage_ticks` units.
#[must_use]
pub fn analysis_stages(stage_ticks: u32) -> Vec<AnalysisStage> {
    STAGE_MESSAGES
        .iter()
        .map(|message| AnalysisStage::new(*message, stage_ticks))
        .collect()
}

/// Renders the demo playbook for a company.
///
/// Stands in for the analysis backend's generated report; deterministic
/// so walkthroughs and tests see stable content.
#[must_use]
pub fn demo_playbook_html(company: &CompanyData) -> String {
    let industry = company.industry.as_deref().unwrap_or("your industry");
    let location = company.location.as_deref().unwrap_or("your market");
    format!(
        "<article>\
<h1>{name} Brand Playbook</h1>\
<section><h2>Positioning</h2>\
<p>{name} is positioned to lead {industry} in {location} by owning a \
clear, differentiated story.</p></section>\
<section><h2>Audience</h2>\
<p>Three core segments emerged from the analysis, ranked by conversion \
potential and message fit.</p></section>\
<section><h2>Next Steps</h2>\
<ul><li>Sharpen the value proposition</li>\
<li>Close the competitor content gap</li>\
<li>Invest in the highest-fit channel first</li></ul></section>\
</article>",
        name = company.name,
    )
}
