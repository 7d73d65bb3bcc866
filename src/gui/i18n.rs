//! 表示言語と翻訳テーブル
//!
//! 言語コードごとに固定のUIラベルを持つ静的データ。

use serde::{Deserialize, Serialize};

/// 対応言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    Hi,
    Zh,
    Ar,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::Hi,
        Language::Zh,
        Language::Ar,
    ];

    /// 言語コード（リクエストに送る値）
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::Hi => "hi",
            Language::Zh => "zh",
            Language::Ar => "ar",
        }
    }

    /// コードから言語を取得。未対応のコードは英語にフォールバック
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
            .unwrap_or_default()
    }

    /// 言語セレクターに表示する名前
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::Hi => "हिन्दी",
            Language::Zh => "中文",
            Language::Ar => "العربية",
        }
    }

    /// 右から左に書く言語か
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }

    /// この言語のラベル
    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Es => &ES,
            Language::Fr => &FR,
            Language::Hi => &HI,
            Language::Zh => &ZH,
            Language::Ar => &AR,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// UIラベル一式
#[derive(Debug, PartialEq, Eq)]
pub struct Labels {
    // ページ
    pub title: &'static str,
    pub header_title: &'static str,
    pub header_subtitle: &'static str,
    pub input_placeholder: &'static str,
    pub design_button: &'static str,
    pub history_title: &'static str,
    pub new_design: &'static str,

    // レポート
    pub report_title: &'static str,
    pub logo_title: &'static str,
    pub chat_title: &'static str,
    pub chat_placeholder: &'static str,
    pub chat_button: &'static str,
    pub brand_archetype: &'static str,
    pub tone_of_voice: &'static str,
    pub core_values: &'static str,
    pub font_pairing_live: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
    pub target_audience: &'static str,
    pub age: &'static str,
    pub occupation: &'static str,
    pub interests: &'static str,
    pub pain_points: &'static str,
    pub brand_names_title: &'static str,
    pub slogans_title: &'static str,
    pub brand_story_title: &'static str,
    pub font_preview_heading_text: &'static str,
    pub font_preview_body_text: &'static str,
}

static EN: Labels = Labels {
    title: "PsyDesign AI - Brand Psychology Designer",
    header_title: "PsyDesign AI",
    header_subtitle: "Your brand's soul, designed by intelligence.",
    input_placeholder: "e.g., 'A sustainable coffee brand for urban youth.'",
    design_button: "Design My Brand",
    history_title: "Design History",
    new_design: "New Design",
    report_title: "Brand Psychology Report",
    logo_title: "Generated Logo",
    chat_title: "Chat with Your Brand Persona",
    chat_placeholder: "Ask about brand voice...",
    chat_button: "Send",
    brand_archetype: "Brand Archetype",
    tone_of_voice: "Tone of Voice",
    core_values: "Core Values",
    font_pairing_live: "Live Font Pairing Preview",
    heading: "Heading",
    body: "Body",
    target_audience: "Target Audience",
    age: "Age",
    occupation: "Occupation",
    interests: "Interests",
    pain_points: "Pain Points",
    brand_names_title: "Suggested Brand Names",
    slogans_title: "Suggested Slogans",
    brand_story_title: "Brand Story",
    font_preview_heading_text: "This is a Heading.",
    font_preview_body_text: "This is the body text. It's designed to give you a feel for the selected font in a paragraph.",
};

static ES: Labels = Labels {
    title: "PsyDesign AI - Diseñador de Psicología de Marca",
    header_title: "PsyDesign AI",
    header_subtitle: "El alma de tu marca, diseñada por inteligencia.",
    input_placeholder: "Ej: 'Una marca de café sostenible para jóvenes urbanos.'",
    design_button: "Diseñar Mi Marca",
    history_title: "Historial de Diseños",
    new_design: "Nuevo Diseño",
    report_title: "Informe de Psicología de Marca",
    logo_title: "Logo Generado",
    chat_title: "Chatea con la Persona de tu Marca",
    chat_placeholder: "Pregunta sobre el tono...",
    chat_button: "Enviar",
    brand_archetype: "Arquetipo de Marca",
    tone_of_voice: "Tono de Voz",
    core_values: "Valores Fundamentales",
    font_pairing_live: "Previsualización de Fuentes en Vivo",
    heading: "Título",
    body: "Cuerpo",
    target_audience: "Público Objetivo",
    age: "Edad",
    occupation: "Ocupación",
    interests: "Intereses",
    pain_points: "Puntos de Dolor",
    brand_names_title: "Nombres de Marca Sugeridos",
    slogans_title: "Lemas Sugeridos",
    brand_story_title: "Historia de la Marca",
    font_preview_heading_text: "Esto es un Título.",
    font_preview_body_text: "Este es el texto del cuerpo. Está diseñado para que te hagas una idea de la fuente seleccionada en un párrafo.",
};

static FR: Labels = Labels {
    title: "PsyDesign AI - Concepteur en Psychologie de Marque",
    header_title: "PsyDesign AI",
    header_subtitle: "L'âme de votre marque, conçue par l'intelligence.",
    input_placeholder: "Ex: 'Une marque de café durable pour les jeunes urbains.'",
    design_button: "Concevoir Ma Marque",
    history_title: "Historique des Conceptions",
    new_design: "Nouveau Design",
    report_title: "Rapport de Psychologie de Marque",
    logo_title: "Logo Généré",
    chat_title: "Discutez avec le Persona",
    chat_placeholder: "Posez des questions...",
    chat_button: "Envoyer",
    brand_archetype: "Archétype de Marque",
    tone_of_voice: "Ton de la Voix",
    core_values: "Valeurs Fondamentales",
    font_pairing_live: "Aperçu en Direct des Polices",
    heading: "Titre",
    body: "Corps",
    target_audience: "Public Cible",
    age: "Âge",
    occupation: "Profession",
    interests: "Intérêts",
    pain_points: "Points de Douleur",
    brand_names_title: "Noms de Marque Suggérés",
    slogans_title: "Slogans Suggérés",
    brand_story_title: "Histoire de la Marque",
    font_preview_heading_text: "Ceci est un Titre.",
    font_preview_body_text: "Ceci est le corps du texte. Il est conçu pour vous donner une idée de la police sélectionnée dans un paragraphe.",
};

static HI: Labels = Labels {
    title: "साइ-डिज़ाइन AI - ब्रांड मनोविज्ञान डिज़ाइनर",
    header_title: "साइ-डिज़ाइन AI",
    header_subtitle: "आपकी ब्रांड की आत्मा, बुद्धिमत्ता द्वारा डिज़ाइन की गई।",
    input_placeholder: "उदा: 'शहरी युवाओं के लिए एक सस्टेनेबल कॉफ़ी ब्रांड।'",
    design_button: "मेरा ब्रांड डिज़ाइन करें",
    history_title: "डिज़ाइन इतिहास",
    new_design: "नया डिज़ाइन",
    report_title: "ब्रांड मनोविज्ञान रिपोर्ट",
    logo_title: "उत्पन्न लोगो",
    chat_title: "अपने ब्रांड व्यक्तित्व से चैट करें",
    chat_placeholder: "आवाज़ के बारे में पूछें...",
    chat_button: "भेजें",
    brand_archetype: "ब्रांड आद्यरूप",
    tone_of_voice: "आवाज़ का लहजा",
    core_values: "मूलभूत मूल्य",
    font_pairing_live: "लाइव फ़ॉन्ट पूर्वावलोकन",
    heading: "शीर्षक",
    body: "मुख्य-भाग",
    target_audience: "लक्षित दर्शक",
    age: "आयु",
    occupation: "व्यवसाय",
    interests: "रूचियाँ",
    pain_points: "समस्याएं",
    brand_names_title: "सुझाए गए ब्रांड नाम",
    slogans_title: "सुझाए गए नारे",
    brand_story_title: "ब्रांड की कहानी",
    font_preview_heading_text: "यह एक शीर्षक है।",
    font_preview_body_text: "यह मुख्य लेख है। इसे आपको एक पैराग्राफ में चयनित फ़ॉन्ट का अनुभव देने के लिए डिज़ाइन किया गया है।",
};

static ZH: Labels = Labels {
    title: "PsyDesign AI - 品牌心理学设计师",
    header_title: "PsyDesign AI",
    header_subtitle: "智能设计的品牌灵魂。",
    input_placeholder: "例如：'一个为城市青年打造的可持续咖啡品牌。'",
    design_button: "设计我的品牌",
    history_title: "设计历史",
    new_design: "新设计",
    report_title: "品牌心理学报告",
    logo_title: "生成的标志",
    chat_title: "与您的品牌形象聊天",
    chat_placeholder: "询问品牌声音...",
    chat_button: "发送",
    brand_archetype: "品牌原型",
    tone_of_voice: "语气",
    core_values: "核心价值观",
    font_pairing_live: "字体实时预览",
    heading: "标题",
    body: "正文",
    target_audience: "目标受众",
    age: "年龄",
    occupation: "职业",
    interests: "兴趣",
    pain_points: "痛点",
    brand_names_title: "建议的品牌名称",
    slogans_title: "建议的口号",
    brand_story_title: "品牌故事",
    font_preview_heading_text: "这是一个标题。",
    font_preview_body_text: "这是正文文本。它旨在让您感受所选字体在段落中的效果。",
};

static AR: Labels = Labels {
    title: "PsyDesign AI - مصمم سيكولوجية العلامة التجارية",
    header_title: "PsyDesign AI",
    header_subtitle: "روح علامتك التجارية، مصممة بالذكاء.",
    input_placeholder: "مثال: 'علامة تجارية مستدامة للقهوة لشباب المدن.'",
    design_button: "صمم علامتي التجارية",
    history_title: "سجل التصميمات",
    new_design: "تصميم جديد",
    report_title: "تقرير سيكولوجية العلامة التجارية",
    logo_title: "الشعار المُولَّد",
    chat_title: "تحدث مع شخصية علامتك",
    chat_placeholder: "اسأل عن نبرة العلامة...",
    chat_button: "إرسال",
    brand_archetype: "النموذج الأصلي للعلامة",
    tone_of_voice: "نبرة الصوت",
    core_values: "القيم الأساسية",
    font_pairing_live: "معاينة حية للخطوط",
    heading: "عنوان",
    body: "متن",
    target_audience: "الجمهور المستهدف",
    age: "العمر",
    occupation: "المهنة",
    interests: "الاهتمامات",
    pain_points: "نقاط الألم",
    brand_names_title: "أسماء تجارية مقترحة",
    slogans_title: "شعارات مقترحة",
    brand_story_title: "قصة العلامة التجارية",
    font_preview_heading_text: "هذا عنوان.",
    font_preview_body_text: "هذا هو نص المتن. وهو مصمم ليعطيك إحساسًا بالخط المحدد في فقرة.",
};
