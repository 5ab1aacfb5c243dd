use crate::models::{EaseOptions, ImagePayload, ImageReference, PromptRequest, StyleModifier};

use super::templates;

/// Builder output: the ordered image payloads plus the instruction text that
/// travels as the trailing part of the same request.
#[derive(Debug, Clone)]
pub struct AssembledRequest {
    pub system_instruction: String,
    pub instruction: String,
    pub payloads: Vec<ImagePayload>,
}

/// Deterministically assembles the wire-ready request for a submission.
///
/// Dispatch is an exhaustive match over the request variants; adding a mode
/// extends this function at compile time rather than falling through a
/// string comparison.
pub fn build_request(request: &PromptRequest) -> AssembledRequest {
    let (instruction, payloads) = match request {
        PromptRequest::SingleFrame {
            image,
            description,
            modifiers,
        } => (
            single_frame_instruction(description, modifiers),
            vec![image.payload()],
        ),
        PromptRequest::StartEnd {
            start,
            end,
            description,
            modifiers,
            ease,
        } => (
            start_end_instruction(description, modifiers, *ease),
            vec![start.payload(), end.payload()],
        ),
        PromptRequest::MultiRef {
            images,
            description,
            modifiers,
        } => (
            multi_ref_instruction(images, description, modifiers),
            images.iter().map(ImageReference::payload).collect(),
        ),
    };

    AssembledRequest {
        system_instruction: templates::SYSTEM_INSTRUCTION.to_string(),
        instruction,
        payloads,
    }
}

fn single_frame_instruction(description: &str, modifiers: &[StyleModifier]) -> String {
    format!(
        "我提供了一张图片。\n我的简单构思是: \"{}\"。\n\n任务:\n1. 分析图片内容。\n2. 基于构思，写一段**简练**的中文视频提示词，让画面动起来。\n3. 重点描述动作和关键视觉元素。\n4. **字数控制在 100 字左右**，不要太长。{}",
        description,
        templates::modifier_clause(modifiers)
    )
}

fn start_end_instruction(
    description: &str,
    modifiers: &[StyleModifier],
    ease: EaseOptions,
) -> String {
    format!(
        "我提供了两张图片：\n- 第一张是起始帧 (START)。\n- 第二张是结束帧 (END)。\n\n我对过渡的简单构思是: \"{}\"。\n\n任务:\n1. 写一段**简练**的中文视频提示词，连接这两个状态。\n2. 描述从起始帧到结束帧的关键变化。\n3. 保持语言紧凑。{}{}",
        description,
        templates::ease_section(ease),
        templates::modifier_clause(modifiers)
    )
}

fn multi_ref_instruction(
    images: &[ImageReference],
    description: &str,
    modifiers: &[StyleModifier],
) -> String {
    let mapping: Vec<String> = images
        .iter()
        .enumerate()
        .map(|(index, image)| format!("图片 {} 代表: \"{}\"", index + 1, image.display_label(index)))
        .collect();

    format!(
        "我提供了多张参考图片，并指定了它们的内容：\n{}\n\n我的故事/构思是: \"{}\"。\n\n任务:\n1. 写一段**简练**的中文视频生成提示词，融合这些特定的角色/物体。\n2. 确保角色外观描述准确但简洁。\n3. 重点描述互动和剧情。{}",
        mapping.join("\n"),
        description,
        templates::modifier_clause(modifiers)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::templates::{EASE_IN_CLAUSE, EASE_OUT_CLAUSE, SYSTEM_INSTRUCTION};

    fn png(byte: u8) -> ImageReference {
        ImageReference::new(vec![byte], "image/png")
    }

    #[test]
    fn single_frame_emits_one_payload_with_literal_description() {
        // mode=single-frame, one image, no modifiers
        let request = PromptRequest::SingleFrame {
            image: png(1),
            description: "a cat walks on a rainy street".into(),
            modifiers: vec![],
        };
        let assembled = build_request(&request);
        assert_eq!(assembled.payloads.len(), 1);
        assert!(assembled
            .instruction
            .contains("a cat walks on a rainy street"));
        assert!(!assembled.instruction.contains("风格增强方向"));
        assert_eq!(assembled.system_instruction, SYSTEM_INSTRUCTION);
    }

    #[test]
    fn single_frame_appends_modifier_clause_when_selected() {
        let request = PromptRequest::SingleFrame {
            image: png(1),
            description: "霓虹街道".into(),
            modifiers: vec![StyleModifier::Lighting, StyleModifier::Camera],
        };
        let assembled = build_request(&request);
        assert!(assembled.instruction.contains("风格增强方向"));
        assert!(assembled
            .instruction
            .contains("Cinematic Lighting, Camera Movement"));
    }

    #[test]
    fn start_end_payload_order_is_start_then_end() {
        let start = png(10);
        let end = png(20);
        let request = PromptRequest::StartEnd {
            start: start.clone(),
            end: end.clone(),
            description: "day turns to night".into(),
            modifiers: vec![],
            ease: EaseOptions {
                ease_in: true,
                ease_out: false,
            },
        };
        let assembled = build_request(&request);
        assert_eq!(assembled.payloads.len(), 2);
        assert_eq!(assembled.payloads[0], start.payload());
        assert_eq!(assembled.payloads[1], end.payload());
        assert!(assembled.instruction.contains("day turns to night"));
        assert!(assembled.instruction.contains(EASE_IN_CLAUSE));
        assert!(!assembled.instruction.contains(EASE_OUT_CLAUSE));
    }

    #[test]
    fn ease_flags_map_to_their_clauses() {
        let build = |ease_in: bool, ease_out: bool| {
            build_request(&PromptRequest::StartEnd {
                start: png(1),
                end: png(2),
                description: "过渡".into(),
                modifiers: vec![],
                ease: EaseOptions { ease_in, ease_out },
            })
            .instruction
        };

        let neither = build(false, false);
        assert!(!neither.contains(EASE_IN_CLAUSE));
        assert!(!neither.contains(EASE_OUT_CLAUSE));

        let out_only = build(false, true);
        assert!(!out_only.contains(EASE_IN_CLAUSE));
        assert!(out_only.contains(EASE_OUT_CLAUSE));

        let both = build(true, true);
        let in_at = both.find(EASE_IN_CLAUSE).unwrap();
        let out_at = both.find(EASE_OUT_CLAUSE).unwrap();
        assert!(in_at < out_at);
    }

    #[test]
    fn multi_ref_lists_every_image_with_label_or_fallback() {
        let request = PromptRequest::MultiRef {
            images: vec![
                png(1).with_label("主角"),
                png(2),
                png(3).with_label("魔法剑"),
            ],
            description: "主角拔出魔法剑".into(),
            modifiers: vec![],
        };
        let assembled = build_request(&request);
        assert_eq!(assembled.payloads.len(), 3);
        assert!(assembled.instruction.contains("图片 1 代表: \"主角\""));
        assert!(assembled.instruction.contains("图片 2 代表: \"主体 2\""));
        assert!(assembled.instruction.contains("图片 3 代表: \"魔法剑\""));
        assert!(assembled.instruction.contains("主角拔出魔法剑"));
    }

    #[test]
    fn multi_ref_payload_order_follows_input_order() {
        let images = vec![png(7), png(8), png(9), png(10)];
        let expected: Vec<ImagePayload> = images.iter().map(ImageReference::payload).collect();
        let request = PromptRequest::MultiRef {
            images,
            description: "四个主体同框".into(),
            modifiers: vec![],
        };
        let assembled = build_request(&request);
        assert_eq!(assembled.payloads, expected);
    }
}
