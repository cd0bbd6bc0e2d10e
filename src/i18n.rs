use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ru,
    Zh,
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl Language {
    pub const SUPPORTED: [Language; 3] = [Language::En, Language::Ru, Language::Zh];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "ru" => Some(Language::Ru),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Zh => "zh",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Ru => RU,
            Language::Zh => ZH,
        }
    }

    pub fn lookup(self, key: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, text)| *text)
    }
}

/// Translation of `key` in `language_code`, or `key` itself when either is unknown.
pub fn text<'a>(language_code: &str, key: &'a str) -> &'a str {
    Language::from_code(language_code)
        .and_then(|language| language.lookup(key))
        .unwrap_or(key)
}

/// Holds the active UI language.
#[derive(Debug, Clone, Default)]
pub struct Localizer {
    language: Language,
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switches language; unsupported codes leave it unchanged and return false.
    pub fn set_language(&mut self, code: &str) -> bool {
        match Language::from_code(code) {
            Some(language) => {
                self.language = language;
                true
            }
            None => false,
        }
    }

    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        self.language.lookup(key).unwrap_or(key)
    }

    pub fn format_reaction_time(&self, reaction_ms: u32) -> String {
        self.get("reaction_time")
            .replacen("{}", &reaction_ms.to_string(), 1)
    }
}

const EN: &[(&str, &str)] = &[
    ("mood_tracker", "Mood\nTracker"),
    ("meditate", "Meditate"),
    ("concentration", "Concentration"),
    ("emotional_intelligence", "Emotional Intelligence"),
    ("track_mood", "Track your mood\nand reflect on your\nemotional patterns"),
    ("track_button", "Track"),
    ("start_button", "Start"),
    ("meditation_benefit", "Regular meditation has\nbeen shown to reduce\nstress and improve overall\nwell-being."),
    ("concentration_desc", "Focus on a task to enhance\ncognitive performance"),
    ("ei_desc", "Improve self-awareness and\ninterpersonal skills"),
    ("how_feeling", "How are you feeling today?"),
    ("very_bad", "Very Bad"),
    ("bad", "Bad"),
    ("okay", "Okay"),
    ("good", "Good"),
    ("excellent", "Excellent"),
    ("save_mood", "Save Mood"),
    ("meditation_timer", "Meditation Timer"),
    ("breathe_in", "Breathe In"),
    ("breathe_out", "Breathe Out"),
    ("hold", "Hold"),
    ("well_done", "Well Done!"),
    ("session_complete", "Meditation session completed"),
    ("concentration_game", "Concentration Exercise"),
    ("focus_circle", "Focus on the circle and tap when it turns green"),
    ("reaction_time", "Reaction Time: {} ms"),
    ("ei_tip", "Daily EQ Tip"),
    ("settings", "Settings"),
    ("language", "Language"),
];

const RU: &[(&str, &str)] = &[
    ("mood_tracker", "Трекер\nНастроения"),
    ("meditate", "Медитация"),
    ("concentration", "Концентрация"),
    ("emotional_intelligence", "Эмоциональный Интеллект"),
    ("track_mood", "Отслеживайте настроение\nи анализируйте свои\nэмоциональные паттерны"),
    ("track_button", "Отследить"),
    ("start_button", "Начать"),
    ("meditation_benefit", "Регулярная медитация\nснижает стресс и улучшает\nобщее самочувствие."),
    ("concentration_desc", "Сосредоточьтесь на задаче\nдля улучшения когнитивных\nспособностей"),
    ("ei_desc", "Развивайте самосознание\nи навыки общения"),
    ("how_feeling", "Как вы себя чувствуете сегодня?"),
    ("very_bad", "Очень плохо"),
    ("bad", "Плохо"),
    ("okay", "Нормально"),
    ("good", "Хорошо"),
    ("excellent", "Отлично"),
    ("save_mood", "Сохранить"),
    ("meditation_timer", "Таймер Медитации"),
    ("breathe_in", "Вдох"),
    ("breathe_out", "Выдох"),
    ("hold", "Задержка"),
    ("well_done", "Отлично!"),
    ("session_complete", "Сессия медитации завершена"),
    ("concentration_game", "Упражнение на Концентрацию"),
    ("focus_circle", "Следите за кругом и нажмите, когда он станет зеленым"),
    ("reaction_time", "Время реакции: {} мс"),
    ("ei_tip", "Совет дня по EQ"),
    ("settings", "Настройки"),
    ("language", "Язык"),
];

const ZH: &[(&str, &str)] = &[
    ("mood_tracker", "情绪\n追踪器"),
    ("meditate", "冥想"),
    ("concentration", "专注力"),
    ("emotional_intelligence", "情商"),
    ("track_mood", "追踪您的情绪\n并反思您的\n情感模式"),
    ("track_button", "追踪"),
    ("start_button", "开始"),
    ("meditation_benefit", "定期冥想已被证明\n可以减轻压力并改善\n整体健康状况。"),
    ("concentration_desc", "专注于任务以增强\n认知能力"),
    ("ei_desc", "提高自我意识和\n人际交往技能"),
    ("how_feeling", "您今天感觉如何？"),
    ("very_bad", "很差"),
    ("bad", "差"),
    ("okay", "还行"),
    ("good", "好"),
    ("excellent", "非常好"),
    ("save_mood", "保存情绪"),
    ("meditation_timer", "冥想计时器"),
    ("breathe_in", "吸气"),
    ("breathe_out", "呼气"),
    ("hold", "屏息"),
    ("well_done", "做得好！"),
    ("session_complete", "冥想课程已完成"),
    ("concentration_game", "专注力练习"),
    ("focus_circle", "注视圆圈，当它变绿时点击"),
    ("reaction_time", "反应时间：{} 毫秒"),
    ("ei_tip", "每日情商小贴士"),
    ("settings", "设置"),
    ("language", "语言"),
];
