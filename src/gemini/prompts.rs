use serde_json::{json, Value};

use crate::types::AnalysisResult;

pub fn analysis_prompt(script: &str) -> String {
    format!(
        "다음 유튜브 대본을 분석해줘. 이 대본의 구조, 톤, 타겟 시청자, 그리고 후킹 전략을 분석해.\n\
         그리고 이 스타일과 포맷을 그대로 적용할 수 있는 흥미로운 주제 5가지를 추천해줘.\n\
         반드시 한국어로 출력해야 해.\n\
         \n\
         [대본 내용]:\n\
         {script}"
    )
}

pub fn generation_prompt(topic: &str, analysis: &AnalysisResult) -> String {
    format!(
        "당신은 전문 유튜브 대본 작가입니다.\n\
         \n\
         [목표]: '{topic}'이라는 주제로 새로운 유튜브 대본을 작성하세요.\n\
         \n\
         [필수 조건]:\n\
         다음 분석된 스타일을 철저히 따라야 합니다. 구조, 톤, 호흡을 복제하듯이 작성하세요.\n\
         \n\
         - 구조 스타일: {structure}\n\
         - 톤앤매너: {tone}\n\
         - 타겟 시청자: {audience}\n\
         - 후킹 전략: {hook}\n\
         \n\
         대본은 바로 촬영에 들어갈 수 있도록 구어체로 자연스럽게 작성해주세요.\n\
         지문(행동 묘사)이 필요하다면 (괄호) 안에 넣어주세요.",
        structure = analysis.structure,
        tone = analysis.tone,
        audience = analysis.target_audience,
        hook = analysis.hook_strategy,
    )
}

/// Response schema sent with the analysis request. Field names must stay in
/// sync with `AnalysisResult`'s serde names.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "structure": {
                "type": "STRING",
                "description": "Detailed analysis of the script's structure (Intro, Body, Outro, transitions)."
            },
            "tone": {
                "type": "STRING",
                "description": "The tone and manner of the script (e.g., humorous, serious, fast-paced)."
            },
            "targetAudience": {
                "type": "STRING",
                "description": "Inferred target audience based on language and content."
            },
            "hookStrategy": {
                "type": "STRING",
                "description": "How the script grabs attention in the first few sentences."
            },
            "suggestedTopics": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "5 creative and related topics that would fit this specific script style."
            }
        },
        "required": ["structure", "tone", "targetAudience", "hookStrategy", "suggestedTopics"]
    })
}
