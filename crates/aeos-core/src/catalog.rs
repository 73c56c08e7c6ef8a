//! Built-in division catalog.
//!
//! Four divisions, registered in this order: Earth Intelligence, Enterprise
//! Intelligence, DeFi & Transactions, Human Interaction. With
//! [`PredicateKind::Keywords`] each accepts only queries containing one of
//! its case keywords; with [`PredicateKind::Always`] the first one accepts
//! everything and the rest are reachable only by direct routing.

use crate::division::{Case, CoreDivision, DivisionBuilder, KeywordDivision, PredicateKind};
use crate::registry::{ConfigurationError, Registry, Sealed};

pub const EARTH_COST: f64 = 0.02;
pub const ENTERPRISE_COST: f64 = 0.015;
pub const DEFI_COST: f64 = 0.03;
pub const HUMAN_COST: f64 = 0.005;

/// Planetary monitoring, weather, satellites, disaster forecasting.
pub fn earth_intelligence(predicate: PredicateKind) -> Result<KeywordDivision, ConfigurationError> {
    DivisionBuilder::new("EID - Earth Intelligence")
        .id("eid")
        .description("Planetary monitoring, weather analysis, IoT grid, disaster prediction.")
        .capabilities([
            "Planetary Monitoring",
            "Weather Analysis",
            "Satellite Uplink",
            "Disaster Forecast",
        ])
        .cost(EARTH_COST)
        .predicate(predicate)
        .case(
            Case::new("flood", ["flood"])
                .respond(
                    "CRITICAL WARNING: Flood risk detected in Sector 7. \
                     Initiating autonomous response protocols.",
                )
                .tool("Risk Prediction Model", "Regional Sensors", "High Alert")
                .log("Triggering Drone Swarm for aerial survey."),
        )
        .case(
            Case::new("planetary", ["planetary", "monitor", "venus"])
                .respond(
                    "PLANETARY MONITORING REPORT:\n\
                     • VENUS: Atmospheric pressure nominal. Probe V-9 active.\n\
                     • MARS: Terraforming sim running. Colony Alpha supports life.\n\
                     • JUPITER: Storm tracking on Great Red Spot. Radiation levels high.\n\
                     • MOON: Lunar Gateway operational. Helium-3 mining optimized.",
                )
                .tool("Deep Space Relay", "Solar System Scan", "Data Received")
                .log("Aggregating data from deployed AI probes."),
        )
        .case(
            Case::new("weather", ["weather"])
                .respond(
                    "GLOBAL WEATHER MATRIX:\n\
                     • NORTH AMERICA: Polar Vortex stabilizing. Temp -5°C.\n\
                     • APAC: Monsoon season early warning. Rainfall +20%.\n\
                     • EMEA: Heatwave detected in Southern Sector. Grid load 95%.\n\
                     • LATAM: Amazon humidity levels optimal for regeneration.",
                )
                .tool("Global Atmos Scan", "Multi-Region", "Map Generated"),
        )
        .case(
            Case::new("satellite", ["satellite", "uplink"])
                .respond(
                    "SATELLITE CONSTELLATION STATUS:\n\
                     • SAT-1 (Optics): 100% Uptime. Resolution 50cm.\n\
                     • SAT-2 (Radar): Tracking maritime logistics in Pacific.\n\
                     • SAT-3 (Comms): Relaying secure Masumi Block data.\n\
                     • SAT-4 (Infrared): Wildfire detection active in Sector 4.",
                )
                .tool("Orbital Feed", "Constellation Link", "Connected"),
        )
        .case(
            Case::new("disaster", ["disaster", "forecast"])
                .respond(
                    "DISASTER FORECAST SYSTEM:\n\
                     • FLOOD: Critical Risk in Delta Region. Probability 89%.\n\
                     • FIRE: High Risk in California Sector. Drone Swarm deployed.\n\
                     • QUAKE: Minor tremors detected in Ring of Fire. Mag 2.3.\n\
                     • STORM: Category 1 Cyclone forming in Atlantic.",
                )
                .tool("Risk Prediction Model", "Seismic Sensors", "Alert"),
        )
        .fallback_response("EID is online. Select a specific capability for detailed analysis.")
        .build()
}

/// Marketing, workflow automation, compliance, audit.
pub fn enterprise_intelligence(
    predicate: PredicateKind,
) -> Result<KeywordDivision, ConfigurationError> {
    DivisionBuilder::new("ENID - Enterprise Intelligence")
        .id("enid")
        .description("Business automation, marketing, compliance, data insights.")
        .capabilities([
            "Workflow Automation",
            "Marketing GenAI",
            "Compliance & KYC",
            "Smart Audit",
        ])
        .cost(ENTERPRISE_COST)
        .predicate(predicate)
        .case(
            Case::new("marketing", ["marketing"])
                .respond(
                    "MARKETING OPERATIONS CENTER:\n\
                     • EMAIL: Open rate 24%. A/B test 'Subject Line B' winning.\n\
                     • SOCIAL: Viral trend detected on Twitter. Auto-replying.\n\
                     • SEO: Ranking #1 for 'AI OS'. Traffic +15% WoW.\n\
                     • ADS: CPA reduced by 12% via autonomous bid optimization.",
                )
                .tool("Campaign Manager", "Multi-Channel", "Active"),
        )
        .case(
            Case::new("workflow", ["workflow"])
                .respond(
                    "WORKFLOW AUTOMATION METRICS:\n\
                     • HR: Onboarding time reduced from 5 days to 4 hours.\n\
                     • PROCUREMENT: Supplier invoices auto-paid via smart contract.\n\
                     • IT: 45 support tickets resolved by Level 1 AI Agent.\n\
                     • SALES: CRM updated with 200 new leads from web scraper.",
                )
                .tool("Process Miner", "Corporate Logs", "Optimized"),
        )
        .case(
            Case::new("compliance", ["compliance", "kyc"])
                .respond(
                    "COMPLIANCE & IDENTITY SHIELD:\n\
                     • KYC: User ID verified against Interpol database.\n\
                     • AML: No suspicious transaction patterns detected.\n\
                     • GDPR: Data privacy request processed automatically.\n\
                     • SANCTIONS: Wallet address clean across 15 jurisdictions.",
                )
                .tool("RegTech Scanner", "Global Database", "Verified"),
        )
        .case(
            Case::new("audit", ["audit"])
                .respond(
                    "SMART AUDIT LOGS:\n\
                     • TX-882: Treasury payout confirmed. Block #99281.\n\
                     • AUTH: Admin login via DID at 14:02 UTC.\n\
                     • DATA: EID accessed sensitive satellite feed. Authorized.\n\
                     • CONFIG: Policy update deployed to ENID-Core.",
                )
                .tool("Ledger Verifier", "Cardano Chain", "Synced"),
        )
        .fallback_response("ENID is online. Select a capability to view enterprise metrics.")
        .build()
}

/// Yield, treasury, risk scoring, payments.
pub fn defi_transactions(predicate: PredicateKind) -> Result<KeywordDivision, ConfigurationError> {
    DivisionBuilder::new("DTAD - DeFi & Transactions")
        .id("dtad")
        .description("Financial brain, yield optimization, insurance, payments.")
        .capabilities([
            "Yield Optimization",
            "Smart Treasury",
            "Risk Scoring",
            "Global Payments",
        ])
        .cost(DEFI_COST)
        .predicate(predicate)
        .case(
            Case::new("yield", ["yield"])
                .respond(
                    "YIELD FARMING OPPORTUNITIES:\n\
                     • ADA/MIN: 12.5% APY. Low impermanent loss risk.\n\
                     • ADA/AGIX: 8.2% APY. High volume pool.\n\
                     • STABLE/ADA: 4.5% APY. Safe haven allocation.\n\
                     • LENDING: Supply rate 3.1% on Liqwid Protocol.",
                )
                .tool("Liquidity Scanner", "DEX Aggregator", "Found"),
        )
        .case(
            Case::new("treasury", ["treasury"])
                .respond(
                    "TREASURY ALLOCATION:\n\
                     • NATIVE (ADA): 60% - Staked for network security.\n\
                     • STABLES: 25% - Dry powder for dips.\n\
                     • GOVERNANCE: 10% - Voting power in partner DAOs.\n\
                     • RWA: 5% - Tokenized real estate bonds.",
                )
                .tool("Asset Manager", "DAO Vault", "Balanced"),
        )
        .case(
            Case::new("risk", ["risk"])
                .respond(
                    "RISK ASSESSMENT PROFILE:\n\
                     • CREDIT SCORE: 850 (Excellent). Eligible for under-collateral loans.\n\
                     • VOLATILITY: Portfolio Beta 0.85 (Lower than market).\n\
                     • LIQUIDATION: Health factor 2.4. Safe from margin calls.\n\
                     • DIVERSIFICATION: High. Exposure to 12 asset classes.",
                )
                .tool("Credit Engine", "Wallet Graph", "Scored"),
        )
        .case(
            Case::new("payments", ["pay", "transaction"])
                .respond(
                    "PAYMENT ACTIVITY LOG:\n\
                     • SENT: 50 ADA to User-Alice (Settled < 1s).\n\
                     • RECEIVED: 200 DJED from Merchant-Bob.\n\
                     • SUBSCRIPTION: Paid 5 ADA for Oracle Feed (Auto-renew).\n\
                     • PENDING: Multisig approval needed for 10k ADA transfer.",
                )
                .tool("Payment Rail", "Hydra Head", "Settled"),
        )
        .fallback_response("DTAD is online. Select a financial capability.")
        .build()
}

/// Support, personalization, tickets, voice.
pub fn human_interaction(predicate: PredicateKind) -> Result<KeywordDivision, ConfigurationError> {
    DivisionBuilder::new("HID - Human Interaction")
        .id("hid")
        .description("Support, personalization, user journey, recommendations.")
        .capabilities([
            "24/7 Support",
            "Personalization",
            "Ticket Resolution",
            "Voice Interface",
        ])
        .cost(HUMAN_COST)
        .predicate(predicate)
        .case(
            Case::new("support", ["support"])
                .respond(
                    "ACTIVE SUPPORT SESSIONS:\n\
                     • USER-1: Requesting API key reset. Handling...\n\
                     • USER-2: Asking about staking APY. Answered.\n\
                     • USER-3: Reporting bug in mobile UI. Logged.\n\
                     • SYSTEM: All agents operating at 99.9% uptime.",
                )
                .tool("Chat Engine", "Queue", "Active"),
        )
        .case(
            Case::new("personalization", ["personal"])
                .respond(
                    "USER PERSONALIZATION PROFILE:\n\
                     • PREFERENCE: Dark Mode, High Density Data.\n\
                     • INTERESTS: DeFi, Space Tech, Governance.\n\
                     • ACTIVITY: High frequency trader (Asia Timezone).\n\
                     • SUGGESTION: Enable 'Pro Mode' for advanced charts.",
                )
                .tool("User Graph", "Behavior", "Mapped"),
        )
        .case(
            Case::new("tickets", ["ticket", "resol"])
                .respond(
                    "TICKET RESOLUTION STATS:\n\
                     • OPEN: 3 (Low Priority).\n\
                     • RESOLVED: 142 today (Auto-closed by AI).\n\
                     • ESCALATED: 0 requiring human intervention.\n\
                     • CSAT SCORE: 4.8/5.0 based on recent feedback.",
                )
                .tool("Ticket Master", "CRM", "Updated"),
        )
        .case(
            Case::new("voice", ["voice"])
                .respond(
                    "VOICE INTERFACE METRICS:\n\
                     • ACCURACY: 98.2% Word Error Rate.\n\
                     • LANGUAGE: English (US) detected. Dialect: West Coast.\n\
                     • SENTIMENT: Calm/Professional tone analyzed.\n\
                     • SECURITY: Voiceprint matches User-Admin-01.",
                )
                .tool("Voice Biometrics", "Audio Stream", "Secure"),
        )
        .fallback_response("HID is online. Select an interaction capability.")
        .build()
}

/// The four catalog divisions in registration order.
pub fn divisions(predicate: PredicateKind) -> Result<Vec<KeywordDivision>, ConfigurationError> {
    Ok(vec![
        earth_intelligence(predicate)?,
        enterprise_intelligence(predicate)?,
        defi_transactions(predicate)?,
        human_interaction(predicate)?,
    ])
}

/// The catch-all registered after everything else.
pub fn core_fallback() -> CoreDivision {
    CoreDivision::new()
}

/// Catalog divisions followed by the core fallback, sealed.
pub fn standard_registry(predicate: PredicateKind) -> Result<Registry<Sealed>, ConfigurationError> {
    let mut registry = Registry::new();
    for division in divisions(predicate)? {
        registry.register(division)?;
    }
    registry.register(core_fallback())?;
    Ok(registry.seal())
}
