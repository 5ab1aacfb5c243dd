//! Instruction text shared by every workflow.
//!
//! The output language, length discipline and focus on motion, camera work
//! and lighting are fixed at the system level; the per-mode templates in
//! [`super::builder`] only describe the inputs and the task.

use crate::models::{EaseOptions, StyleModifier};

/// System-level instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "你是 AI 视频提示词专家。你的目标是将用户的输入（描述和图片）转化为适用于视频生成模型的高质量提示词。\n\n请遵循以下原则：\n1. **输出结果必须是中文**。\n2. **保持简练、精准**，严格控制字数，避免冗长的修饰。\n3. 结合用户的简单描述进行润色，精准描述动作、运镜、光影等核心要素。\n4. 去除无意义的废话，直击画面核心。";

pub const EASE_IN_CLAUSE: &str =
    "- **缓入 (Ease In)**: 描述动作或运镜从静止或缓慢状态开始，然后平滑加速。不要从第一帧就剧烈运动。";

pub const EASE_OUT_CLAUSE: &str =
    "- **缓出 (Ease Out)**: 描述动作或运镜在接近尾声时平滑减速，自然地过渡到静止或平稳状态，避免突然截断或急停。";

/// The style-enhancement clause, or an empty string when nothing is selected.
pub fn modifier_clause(modifiers: &[StyleModifier]) -> String {
    if modifiers.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = modifiers.iter().map(|m| m.prompt_name()).collect();
    format!("\n\n风格增强方向 (请融入提示词中): {}.", names.join(", "))
}

/// The motion-smoothing section for start/end transitions. Ease-in always
/// precedes ease-out; with neither flag set the section is empty.
pub fn ease_section(ease: EaseOptions) -> String {
    if !ease.any() {
        return String::new();
    }
    let mut clauses = Vec::new();
    if ease.ease_in {
        clauses.push(EASE_IN_CLAUSE);
    }
    if ease.ease_out {
        clauses.push(EASE_OUT_CLAUSE);
    }
    format!(
        "\n\n关键动态要求 (消除刹车感/顿挫感):\n{}\n请在提示词中明确体现这种速度变化，使视频衔接更流畅。",
        clauses.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_clause_is_empty_without_selection() {
        assert_eq!(modifier_clause(&[]), "");
    }

    #[test]
    fn modifier_clause_joins_names_in_selection_order() {
        let clause = modifier_clause(&[StyleModifier::Camera, StyleModifier::Action]);
        assert!(clause.contains("Camera Movement, Action/Fight Choreography"));
    }

    #[test]
    fn ease_section_orders_in_before_out() {
        let both = ease_section(EaseOptions {
            ease_in: true,
            ease_out: true,
        });
        let in_at = both.find(EASE_IN_CLAUSE).unwrap();
        let out_at = both.find(EASE_OUT_CLAUSE).unwrap();
        assert!(in_at < out_at);

        assert_eq!(ease_section(EaseOptions::default()), "");
    }
}
