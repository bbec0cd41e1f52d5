//! Narrative paragraph about a remembered night sky

use crate::ports::Generator;
use serde::{Deserialize, Serialize};
use thatnightsky_core::error::Result;
use thatnightsky_core::models::{Lang, SkyData};

/// At most this many constellation names go into the prompt
pub const MAX_PROMPT_CONSTELLATIONS: usize = 10;

/// What the narrative is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    /// Place name (normalised address or the raw input)
    pub place: String,

    /// Local date/time as the user wrote it
    pub when: String,

    /// Visible constellation abbreviations
    pub constellations: Vec<String>,

    pub lang: Lang,
}

impl NarrativeRequest {
    /// Request for a computed sky
    pub fn from_sky(sky: &SkyData, when: impl Into<String>, lang: Lang) -> Self {
        Self {
            place: sky.observer().address_display.clone(),
            when: when.into(),
            constellations: sky.visible_constellations().to_vec(),
            lang,
        }
    }
}

/// Build the generation prompt
pub fn build_prompt(request: &NarrativeRequest) -> String {
    let names: Vec<&str> = request
        .constellations
        .iter()
        .take(MAX_PROMPT_CONSTELLATIONS)
        .map(String::as_str)
        .collect();

    let listed = |unknown: &str| {
        if names.is_empty() {
            unknown.to_string()
        } else {
            names.join(", ")
        }
    };

    match request.lang {
        Lang::Ko => format!(
            "장소: {}\n날짜/시각: {}\n보이는 별자리: {}\n\n\
             위 정보를 바탕으로, 그날 밤하늘을 바라보는 사람의 감성을 담은 \
             한국어 한 문단(3~4문장)을 써줘. \
             별자리 이름은 직접 언급하지 말고, 그 밤의 분위기와 감정을 서술해줘. \
             낭만적이고 시적인 톤으로.",
            request.place,
            request.when,
            listed("알 수 없음")
        ),
        Lang::En => format!(
            "Place: {}\nDate/time: {}\nVisible constellations: {}\n\n\
             Based on the above, write one English paragraph (3-4 sentences) capturing \
             the feelings of someone looking up at the night sky that night. \
             Do not name the constellations directly; \
             describe the mood and emotion of the night. \
             Use a romantic, poetic tone.",
            request.place,
            request.when,
            listed("unknown")
        ),
    }
}

/// Text shown when no narrative could be generated
pub fn fallback_text(lang: Lang) -> &'static str {
    match lang {
        Lang::Ko => "그날, 밤, 하늘입니다.",
        Lang::En => "That night. The sky.",
    }
}

/// Writes narratives through a [`Generator`]
pub struct NarrativeWriter<G> {
    generator: G,
}

impl<G: Generator> NarrativeWriter<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate a narrative paragraph
    pub async fn write(&self, request: &NarrativeRequest) -> Result<String> {
        let prompt = build_prompt(request);
        tracing::debug!(
            model = self.generator.model_name(),
            lang = %request.lang,
            constellations = request.constellations.len(),
            "Generating narrative"
        );
        self.generator.generate(&prompt).await
    }

    /// Generate a narrative, or the fallback sentence on failure
    pub async fn write_or_fallback(&self, request: &NarrativeRequest) -> String {
        match self.write(request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Narrative generation failed, using fallback text");
                fallback_text(request.lang).to_string()
            }
        }
    }
}
