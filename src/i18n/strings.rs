//! Key → display string dictionaries, one table per language.
//!
//! The English table is the default and must hold every key the front end
//! renders. The Kannada table may omit keys; lookups for those fall back to
//! English.

/// A dictionary: ordered `(key, display string)` pairs.
pub type Dictionary = &'static [(&'static str, &'static str)];

// ==================== English Strings ====================

/// English strings (default language)
pub const ENGLISH_STRINGS: Dictionary = &[
    // Navigation
    ("home_label", "Home"),
    ("dashboard_label", "Dashboard"),
    ("how_it_works_label", "How It Works"),
    ("about_project_label", "About Project"),
    ("our_team_label", "Our Team"),
    ("get_started", "Get Started"),
    ("language_switched", "Language: {language}"),
    // Homepage
    ("hero_title_part1", "Smarter Farming for a"),
    ("hero_title_accent", "Sustainable Future"),
    (
        "hero_subtitle",
        "Harnessing AI to recommend the perfect crop mix for your land, increasing yield, profit, and soil health.",
    ),
    ("hero_cta", "Get Crop Recommendations"),
    ("problems_title", "The Challenge of Monoculture"),
    ("solution_title", "AI-Powered Crop Diversification"),
    ("features_title", "Transform Your Farming with AI"),
    ("try_tool", "Try Our Tool Now"),
    ("learn_how", "Learn How It Works"),
    ("about_title", "About CropDiversify"),
    ("team_title", "Meet Our Team"),
    // Dashboard
    ("dashboard_title", "Crop Diversification Dashboard"),
    (
        "dashboard_subtitle",
        "Enter your region parameters to get AI-powered crop recommendations",
    ),
    ("region_parameters", "Region Parameters"),
    ("field_district", "District"),
    ("field_season", "Season"),
    ("field_rainfall", "Annual Rainfall (mm)"),
    ("field_fertilizer", "Fertilizer Use (kg/ha)"),
    ("field_pesticide", "Pesticide Use (ltr/ha)"),
    ("run_analysis", "Run AI Analysis"),
    ("running_analysis", "Running AI Analysis..."),
    ("ready_for_analysis_title", "Ready for Analysis"),
    (
        "ready_for_analysis_description",
        "Fill in the region parameters and click \"Run ML Analysis\" to get your personalized crop recommendations.",
    ),
    ("metric_crop_diversity", "Crop Diversity"),
    ("metric_soil_health", "Soil Health Score"),
    ("metric_resilience", "Resilience Score"),
    ("top_recommendations", "Top Recommendations"),
    ("expected_yield", "Expected Yield"),
    ("estimated_profit", "Estimated Profit"),
    ("diversification_benefit", "Diversification Benefit"),
    ("confidence_suffix", "Confidence"),
    ("analysis_complete_title", "Analysis Complete!"),
    (
        "analysis_complete_description",
        "Your personalized crop recommendations are ready.",
    ),
    ("analysis_failed_title", "Analysis Failed"),
    (
        "analysis_failed_description",
        "Could not retrieve recommendations. Please try again later.",
    ),
    // Chat
    ("chat_title", "AgriBot Assistant"),
    ("chat_placeholder", "Ask about crops, soil, pests..."),
    (
        "chat_welcome",
        "Hello! How can I help you with your farming questions today?",
    ),
    ("chat_thinking", "Thinking..."),
    // Footer
    ("footer_brand", "CropDiversify"),
    (
        "footer_description",
        "Harnessing AI to recommend the perfect crop mix for your land, increasing yield, profit, and soil health for sustainable farming.",
    ),
    ("quick_links", "Quick Links"),
    ("resources_title", "Resources"),
    ("contact_email", "cropDiversify@sdmit.in"),
    ("address_line", "SDM Institute of Technology, Ujire, Karnataka"),
    (
        "copyright_line",
        "© 2024 CropDiversify. An Academic Project by SDM Institute of Technology.",
    ),
    ("built_for", "Built for sustainable agriculture in Karnataka, India"),
];

// ==================== Kannada Strings ====================

/// Kannada strings
///
/// Dashboard labels, notifications and the busy indicator are not
/// translated yet and resolve through the English table.
pub const KANNADA_STRINGS: Dictionary = &[
    // Navigation
    ("home_label", "ಮುಖಪುಟ"),
    ("dashboard_label", "ಡ್ಯಾಶ್‌ಬೋರ್ಡ್"),
    ("how_it_works_label", "ಯಾವ ರೀತಿ ಕೆಲಸ ಮಾಡುತ್ತದೆ"),
    ("about_project_label", "ಪ್ರಾಜೆಕ್ಟ್ ಕುರಿತು"),
    ("our_team_label", "ನಮ್ಮ ತಂಡ"),
    ("get_started", "ಆರಂಭಿಸಿ"),
    ("language_switched", "ಭಾಷೆ: {language}"),
    // Homepage
    ("hero_title_part1", "ಸ್ಮಾರ್ಟ್ ಕೃಷಿ"),
    ("hero_title_accent", "ಟಿಕಾವುದಾದ ಭವಿಷ್ಯದಿಗಾಗಿ"),
    (
        "hero_subtitle",
        "ನಿಮ್ಮ ಭೂಮಿಗಾಗಿ ಸೂಕ್ತ ಬೆಳೆ ಮಿಶ್ರಣವನ್ನು ಶಿಫಾರಸು ಮಾಡಲು ಎಐ ಬಳಸಿ, ಉತ್ಪಾದನೆ, ಲಾಭ ಮತ್ತು ಮಣ್ಣಿನ ಆರೋಗ್ಯವನ್ನು ಹೆಚ್ಚಿಸುತ್ತದೆ.",
    ),
    ("hero_cta", "ಬೆಳೆ ಶಿಫಾರಸ್ಸುಗಳನ್ನು ಪಡೆಯಿರಿ"),
    ("problems_title", "ಏಕಜಾತೀಯ ಕೃಷಿಯ ಸವಾಲು"),
    ("solution_title", "ಎಐ ಚಾಲಿತ ಬೆಳೆ ವಿಭಜನ"),
    ("features_title", "ಎಐ ಮೂಲಕ ನಿಮ್ಮ ಕೃಷಿಯನ್ನು ಪರಿವರ್ತಿಸಿ"),
    ("try_tool", "ಈಗ ನಮ್ಮ ಸಾಧನ ಪ್ರಯತ್ನಿಸಿ"),
    ("learn_how", "ಯಾವ ರೀತಿ ಕೆಲಸ ಮಾಡುತ್ತದೆ"),
    ("about_title", "CropDiversify ಬಗ್ಗೆ"),
    ("team_title", "ನಮ್ಮ ತಂಡವನ್ನು ಪರಿಚಯಿಸಿ"),
    // Dashboard
    ("run_analysis", "ಎಐ ವಿಶ್ಲೇಷಣೆ ರನ್ ಮಾಡಿ"),
    ("running_analysis", "ಎಐ ವಿಶ್ಲೇಷಣೆ ನಡೆಯುತ್ತಿದೆ..."),
    ("ready_for_analysis_title", "ವಿಶ್ಲೇಷಣೆಗೆ ಸಿದ್ಧವಾಗಿದೆ"),
    (
        "ready_for_analysis_description",
        "ಪ್ರದೇಶದ ಪರಮಿತಿಗಳನ್ನು ಭರ್ತಿ ಮಾಡಿ ಮತ್ತು ನಿಮ್ಮ ವೈಯಕ್ತಿಕ ಬೆಳೆ ಶಿಫಾರಸ್ಸುಗಳನ್ನು ಪಡೆಯಲು \"ಎಮ್ಎಲ್ ವಿಶ್ಲೇಷಣೆ ರನ್ ಮಾಡಿ\" ಕ್ಲಿಕ್ ಮಾಡಿ.",
    ),
    // Chat
    ("chat_placeholder", "ಬೆಳೆಗಳು, ಮಣ್ಣು, ಕೀಟಗಳ ಬಗ್ಗೆ ಪ್ರಶ್ನೆ ಮಾಡಿ..."),
    (
        "chat_welcome",
        "ಹಲೋ! ನಿಮ್ಮ ಕೃಷಿ ಪ್ರಶ್ನೆಗಳಲ್ಲಿ ನಾನು ಹೇಗೆ ಸಹಾಯ ಮಾಡಬಹುದು?",
    ),
    // Footer
    ("footer_brand", "CropDiversify"),
    (
        "footer_description",
        "ನಿಮ್ಮ ಭೂಮಿಗಾಗಿ ಸೂಕ್ತ ಬೆಳೆ ಮಿಶ್ರಣವನ್ನು ಶಿಫಾರಸು ಮಾಡಲು ಎಐ ಬಳಸಿ, ಉತ್ಪಾದನೆ, ಲಾಭ ಮತ್ತು ಮಣ್ಣಿನ ಆರೈಕೆಯನ್ನು ಹೆಚ್ಚಿಸಿ.",
    ),
    ("quick_links", "ಶೀಘ್ರ ಲಿಂಕ್ಸ್"),
    ("resources_title", "ಸಂಪನ್ಮೂಲಗಳು"),
    ("contact_email", "cropDiversify@sdmit.in"),
    ("address_line", "SDM ಇನ್ಸ್ಟಿಟ್ಯೂಟ್ ಆಫ್ ಟೆಕ್ನಾಲಜಿ, ಉಜಿರೆ, ಕರ್ನಾಟಕ"),
    (
        "copyright_line",
        "© 2024 CropDiversify. SDM ಇನ್ಸ್ಟಿಟ್ಯೂಟ್ ಆಫ್ ಟೆಕ್ನಾಲಜಿ ಅವರ ಒಂದು ಅಕಾಡೆಮಿಕ್ ಪ್ರಾಜೆಕ್ಟ್.",
    ),
    ("built_for", "ಕರ್ನಾಟಕ, ಭಾರತದ ಟಿಕಾವುದಾದ ಕೃಷಿಗಾಗಿ ನಿರ್ಮಿಸಲಾಗಿದೆ"),
];
