// SPDX-License-Identifier: GPL-3.0-only

//! Console string catalog.
//!
//! Every user-visible label comes from [`localize`]. Conversation content is
//! not part of the catalog: it carries its own language (see
//! [`crate::models::turn::LocalizedText`]).

use serde::Serialize;
use strum_macros::{AsRefStr, EnumCount, EnumIter, VariantNames};

use crate::models::language::{TextDirection, UiLanguage};
use crate::models::status::SessionStatus;


/// Semantic key of a console string
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    AsRefStr,
    EnumCount,
    EnumIter,
    VariantNames,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TextKey {
    // Header chrome
    PlatformTagline,
    OfficerName,
    OfficerRole,
    ModePrison,
    ModeHospital,
    SwitchLanguage,
    SwitchLanguageHint,
    StatusLoading,
    StatusReady,
    StatusError,

    // Readiness screen
    HeadingLoading,
    HeadingReady,
    HeadingError,
    SubheadingLoading,
    SubheadingReady,
    SubheadingError,
    RoleOfficer,
    RoleInmate,
    RolePatient,
    PillArabic,
    PillEnglish,
    SecureRealtimeChannel,
    LanguagePair,
    StepSecureChannelTitle,
    StepSecureChannelHelp,
    StepDeviceIdentityTitle,
    StepDeviceIdentityHelp,
    StepMicrophoneTitle,
    StepMicrophoneHelp,
    StepLanguageEngineTitle,
    StepLanguageEngineHelp,
    StepAuditLogTitle,
    StepAuditLogHelp,
    StartSession,
    RetryConnection,

    // Live screen
    Back,
    LiveHeading,
    LivePrompt,
    Speak,
    Listening,
    OfficerLane,
    SubjectLane,
    OriginalLabel,
    TranslationLabel,
    ConfidenceLabel,
    ExportTranscript,
    ClearConversation,
    FlagIncident,
    SessionNotes,

    // Connection-lost overlay
    ConnectionLostTitle,
    ConnectionLostBody,
    ConnectionLostAcknowledge,
    VoicePaused,
}

/// A resolved console string and the direction to lay it out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Localized {
    pub text: &'static str,
    pub direction: TextDirection,
}

impl std::fmt::Display for Localized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text)
    }
}

/// Resolve `key` for the console language `lang`.
#[must_use]
pub fn localize(lang: UiLanguage, key: TextKey) -> Localized {
    let text = match lang {
        UiLanguage::English => english(key),
        UiLanguage::Arabic => arabic(key),
    };
    Localized {
        text,
        direction: lang.direction(),
    }
}

impl TextKey {
    /// Header status pill for a session status
    #[must_use]
    pub fn header_status(status: SessionStatus) -> TextKey {
        match status {
            SessionStatus::Loading => TextKey::StatusLoading,
            SessionStatus::Ready => TextKey::StatusReady,
            SessionStatus::Error => TextKey::StatusError,
        }
    }

    #[must_use]
    pub fn heading(status: SessionStatus) -> TextKey {
        match status {
            SessionStatus::Loading => TextKey::HeadingLoading,
            SessionStatus::Ready => TextKey::HeadingReady,
            SessionStatus::Error => TextKey::HeadingError,
        }
    }

    #[must_use]
    pub fn subheading(status: SessionStatus) -> TextKey {
        match status {
            SessionStatus::Loading => TextKey::SubheadingLoading,
            SessionStatus::Ready => TextKey::SubheadingReady,
            SessionStatus::Error => TextKey::SubheadingError,
        }
    }

    #[must_use]
    pub fn language_pill(lang: UiLanguage) -> TextKey {
        match lang {
            UiLanguage::English => TextKey::PillEnglish,
            UiLanguage::Arabic => TextKey::PillArabic,
        }
    }
}

#[allow(clippy::too_many_lines)]
fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::PlatformTagline => "Prisoner Intelligent Translation Platform (PITP)",
        TextKey::OfficerName => "Lt. Faisal Al-Harbi",
        TextKey::OfficerRole => "Corrections officer",
        TextKey::ModePrison => "Prison",
        TextKey::ModeHospital => "Hospital",
        // Shows the language the toggle switches to
        TextKey::SwitchLanguage => "عربي",
        TextKey::SwitchLanguageHint => "التبديل إلى العربية",
        TextKey::StatusLoading => "Preparing secure channel…",
        TextKey::StatusReady => "Online · Encrypted",
        TextKey::StatusError => "Connection issue",

        TextKey::HeadingLoading => "Preparing secure translator…",
        TextKey::HeadingReady => "Translator ready",
        TextKey::HeadingError => "Unable to connect securely",
        TextKey::SubheadingLoading => "We’re setting up your audio and language channels.",
        TextKey::SubheadingReady => "You can start speaking when you hold the button.",
        TextKey::SubheadingError => "Please check the network or contact technical support.",
        TextKey::RoleOfficer => "👮 Officer",
        TextKey::RoleInmate => "👤 Inmate",
        TextKey::RolePatient => "👤 Patient",
        TextKey::PillArabic => "Arabic (AR)",
        TextKey::PillEnglish => "English (EN)",
        TextKey::SecureRealtimeChannel => "Secure real-time channel",
        TextKey::LanguagePair => "AR ⇄ EN",
        TextKey::StepSecureChannelTitle => "Secure connection",
        TextKey::StepSecureChannelHelp => {
            "TLS encrypted channel between device and translator service."
        }
        TextKey::StepDeviceIdentityTitle => "Verifying device identity",
        TextKey::StepDeviceIdentityHelp => "Registered console and officer credentials.",
        TextKey::StepMicrophoneTitle => "Checking microphone",
        TextKey::StepMicrophoneHelp => "Input levels and permissions for both languages.",
        TextKey::StepLanguageEngineTitle => "Initializing language engine",
        TextKey::StepLanguageEngineHelp => "Arabic–English real-time translation pipeline.",
        TextKey::StepAuditLogTitle => "Opening session audit log",
        TextKey::StepAuditLogHelp => "Every exchange is recorded for institutional review.",
        TextKey::StartSession => "Start translation session",
        TextKey::RetryConnection => "Retry connection",

        TextKey::Back => "Back to start screen",
        TextKey::LiveHeading => "Live translator dashboard",
        TextKey::LivePrompt => "Press the microphone to start the conversation.",
        TextKey::Speak => "🎤 Speak",
        TextKey::Listening => "Listening",
        TextKey::OfficerLane => "Officer · speaking (AR → EN)",
        TextKey::SubjectLane => "Subject · hearing (EN → AR)",
        TextKey::OriginalLabel => "Original",
        TextKey::TranslationLabel => "Translation",
        TextKey::ConfidenceLabel => "Confidence",
        TextKey::ExportTranscript => "Export transcript",
        TextKey::ClearConversation => "Clear conversation",
        TextKey::FlagIncident => "Flag incident",
        TextKey::SessionNotes => "Session notes",

        TextKey::ConnectionLostTitle => "Secure connection lost",
        TextKey::ConnectionLostBody => {
            "The encrypted link to the translator was interrupted. Voice interaction is paused."
        }
        TextKey::ConnectionLostAcknowledge => "Retry",
        TextKey::VoicePaused => "Voice paused",
    }
}

#[allow(clippy::too_many_lines)]
fn arabic(key: TextKey) -> &'static str {
    match key {
        TextKey::PlatformTagline => "الروبوت الذكي للترجمة الفورية والتفاعلية للنزلاء",
        TextKey::OfficerName => "الملازم فيصل الحربي",
        TextKey::OfficerRole => "ضابط الإصلاحيات",
        TextKey::ModePrison => "السجن",
        TextKey::ModeHospital => "المستشفى",
        TextKey::SwitchLanguage => "EN",
        TextKey::SwitchLanguageHint => "Switch to English",
        TextKey::StatusLoading => "جارٍ تجهيز القناة الآمنة…",
        TextKey::StatusReady => "متصل · مشفّر",
        TextKey::StatusError => "مشكلة في الاتصال",

        TextKey::HeadingLoading => "جارٍ تجهيز المترجم الآمن…",
        TextKey::HeadingReady => "المترجم جاهز",
        TextKey::HeadingError => "تعذّر الاتصال بشكل آمن",
        TextKey::SubheadingLoading => "نقوم بإعداد قنوات الصوت واللغة الخاصة بك.",
        TextKey::SubheadingReady => "يمكنك البدء بالتحدث عند الضغط مطولاً على الزر.",
        TextKey::SubheadingError => "يرجى التحقق من الشبكة أو التواصل مع الدعم الفني.",
        TextKey::RoleOfficer => "👮 الضابط",
        TextKey::RoleInmate => "👤 النزيل",
        TextKey::RolePatient => "👤 المريض",
        TextKey::PillArabic => "العربية (AR)",
        TextKey::PillEnglish => "الإنجليزية (EN)",
        TextKey::SecureRealtimeChannel => "قناة آمنة في الوقت الفعلي",
        TextKey::LanguagePair => "AR ⇄ EN",
        TextKey::StepSecureChannelTitle => "اتصال آمن",
        TextKey::StepSecureChannelHelp => "قناة مشفّرة بـ TLS بين الجهاز وخدمة الترجمة.",
        TextKey::StepDeviceIdentityTitle => "التحقق من هوية الجهاز",
        TextKey::StepDeviceIdentityHelp => "الجهاز المسجّل وبيانات اعتماد الضابط.",
        TextKey::StepMicrophoneTitle => "فحص الميكروفون",
        TextKey::StepMicrophoneHelp => "مستويات الإدخال والأذونات لكلتا اللغتين.",
        TextKey::StepLanguageEngineTitle => "تهيئة محرك اللغة",
        TextKey::StepLanguageEngineHelp => "مسار الترجمة الفورية بين العربية والإنجليزية.",
        TextKey::StepAuditLogTitle => "فتح سجل تدقيق الجلسة",
        TextKey::StepAuditLogHelp => "يتم تسجيل كل محادثة للمراجعة المؤسسية.",
        TextKey::StartSession => "بدء جلسة الترجمة",
        TextKey::RetryConnection => "إعادة محاولة الاتصال",

        TextKey::Back => "العودة إلى شاشة البداية",
        TextKey::LiveHeading => "لوحة الترجمة المباشرة",
        TextKey::LivePrompt => "اضغط على الميكروفون لبدء المحادثة.",
        TextKey::Speak => "🎤 تحدّث",
        TextKey::Listening => "جارٍ الاستماع",
        TextKey::OfficerLane => "الضابط · يتحدث (AR → EN)",
        TextKey::SubjectLane => "الطرف الآخر · يستمع (EN → AR)",
        TextKey::OriginalLabel => "النص الأصلي",
        TextKey::TranslationLabel => "الترجمة",
        TextKey::ConfidenceLabel => "الدقة",
        TextKey::ExportTranscript => "تصدير المحضر",
        TextKey::ClearConversation => "مسح المحادثة",
        TextKey::FlagIncident => "الإبلاغ عن حادثة",
        TextKey::SessionNotes => "ملاحظات الجلسة",

        TextKey::ConnectionLostTitle => "انقطع الاتصال الآمن",
        TextKey::ConnectionLostBody => "انقطع الرابط المشفّر مع المترجم. تم إيقاف التفاعل الصوتي مؤقتاً.",
        TextKey::ConnectionLostAcknowledge => "إعادة المحاولة",
        TextKey::VoicePaused => "الصوت متوقف مؤقتاً",
    }
}
