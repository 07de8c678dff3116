use crate::llm::client::LLMClient;
use crate::pipeline::state::Mode;

const BRIEF_INSTRUCTION: &str = "Be brief (6–8 bullet points max).";
const THOROUGH_INSTRUCTION: &str = "Be thorough. Use subheadings, numbered lists, and include 6–10 evidence bullets with sources/links when available.";
const ASSUMPTIONS_INSTRUCTION: &str = "Avoid speculation; clearly mark assumptions.";
const CHECKLIST_INSTRUCTION: &str = "End with a short 'Next actions' checklist.";

/// 角色智能体，身份在构造时确定，调用之间无状态
#[derive(Debug, Clone, PartialEq)]
pub struct RoleAgent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl RoleAgent {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// 根据模式选择篇幅要求
    pub fn detail_instruction(mode: Mode) -> &'static str {
        match mode {
            Mode::Fast => BRIEF_INSTRUCTION,
            Mode::Deep => THOROUGH_INSTRUCTION,
        }
    }

    /// 组装完整prompt：身份、任务、上下文与输出要求
    pub fn render_prompt(&self, task: &str, context: &str, mode: Mode) -> String {
        format!(
            "You are {role}.\nGoal: {goal}\nBackstory: {backstory}\n\nTask: {task}\n\nContext:\n{context}\n\nOutput requirements:\n- {detail}\n- {assumptions}\n- {checklist}",
            role = self.role,
            goal = self.goal,
            backstory = self.backstory,
            task = task,
            context = context,
            detail = Self::detail_instruction(mode),
            assumptions = ASSUMPTIONS_INSTRUCTION,
            checklist = CHECKLIST_INSTRUCTION,
        )
    }

    /// 执行任务，原样返回模型输出
    pub async fn run(&self, client: &LLMClient, task: &str, context: &str, mode: Mode) -> String {
        let prompt = self.render_prompt(task, context, mode);
        client.complete(&prompt).await
    }
}
