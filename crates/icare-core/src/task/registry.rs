//! The built-in care task catalogue.

use super::model::{CareTask, RequiredData, TaskCategory};

/// Read-only catalogue of care tasks, in display order.
#[derive(Debug, Clone, Copy)]
pub struct TaskRegistry {
    tasks: &'static [CareTask],
}

impl TaskRegistry {
    /// The standard ten-task catalogue.
    pub fn standard() -> Self {
        Self { tasks: CARE_TASKS }
    }

    /// A registry over a caller-supplied catalogue.
    pub fn with_tasks(tasks: &'static [CareTask]) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &'static [CareTask] {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&'static CareTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn by_category(&self, category: TaskCategory) -> impl Iterator<Item = &'static CareTask> {
        self.tasks.iter().filter(move |task| task.category == category)
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

static CARE_TASKS: &[CareTask] = &[
    CareTask {
        id: "turn_position",
        name: "翻身与体位",
        category: TaskCategory::BasicCare,
        frequency: "每2小时一次",
        description: "预防压疮、坠积性肺炎",
        steps: &[
            "左右侧卧和平卧交替",
            "使用软枕支撑背部、膝下",
            "避免拖、拉、推，防止皮肤擦伤",
        ],
        check_points: &[
            "检查骶尾部皮肤",
            "检查脚后跟皮肤",
            "检查肘部皮肤",
            "检查肩胛骨皮肤",
            "记录本次体位方向",
        ],
        alert_note: None,
        required_data: None,
        requires_photo: true,
    },
    CareTask {
        id: "oral_care",
        name: "口腔护理",
        category: TaskCategory::BasicCare,
        frequency: "早晚各一次，餐后酌情",
        description: "预防口腔感染、吸入性肺炎",
        steps: &[
            "用软毛牙刷或海绵棒蘸生理盐水/漱口水",
            "轻刷牙齿、牙龈、舌面",
            "昏迷或张口困难者用棉签蘸水湿润口腔",
        ],
        check_points: &[
            "观察口腔黏膜有无溃疡",
            "观察有无白斑",
            "观察有无出血",
            "记录异常发现",
        ],
        alert_note: None,
        required_data: None,
        requires_photo: false,
    },
    CareTask {
        id: "nasal_feeding",
        name: "鼻饲喂养",
        category: TaskCategory::BasicCare,
        frequency: "遵医嘱定时定量",
        description: "营养支持，维持身体机能",
        steps: &[
            "营养液加温至37-40℃",
            "回抽胃内容物确认胃管位置",
            "如残留>150ml，暂停喂养并告知护士",
            "抬高床头30-45°，保持30分钟以上",
            "缓慢推注或重力滴注，每次≤200ml，间隔2小时",
        ],
        check_points: &["记录喂养时间", "记录喂养量(ml)", "记录胃内残留量"],
        alert_note: None,
        required_data: Some(RequiredData::IntakeOutput),
        requires_photo: false,
    },
    CareTask {
        id: "perineal_care",
        name: "会阴护理",
        category: TaskCategory::BasicCare,
        frequency: "每日2次，便后立即",
        description: "预防尿路感染、失禁性皮炎",
        steps: &[
            "用温水毛巾由前向后擦洗",
            "保持干燥",
            "观察尿道口有无红肿、分泌物",
            "检查尿管是否通畅、有无打折",
            "便后及时清洁肛周",
            "涂抹氧化锌软膏保护皮肤",
        ],
        check_points: &["尿道口无红肿", "尿管通畅", "皮肤干燥清洁", "记录异常发现"],
        alert_note: None,
        required_data: None,
        requires_photo: false,
    },
    CareTask {
        id: "passive_exercise",
        name: "被动关节活动",
        category: TaskCategory::Rehabilitation,
        frequency: "每日2次，每次15分钟",
        description: "预防关节挛缩、肌肉萎缩、深静脉血栓",
        steps: &[
            "从大关节到小关节：肩→肘→腕→手指→髋→膝→踝→足趾",
            "缓慢、轻柔地屈伸、旋转",
            "每个关节活动5-10次",
            "遇到明显阻力时立即停止",
        ],
        check_points: &[
            "完成上肢关节活动",
            "完成下肢关节活动",
            "活动时无异常反应",
            "记录有无不适",
        ],
        alert_note: None,
        required_data: None,
        requires_photo: false,
    },
    CareTask {
        id: "skin_check",
        name: "皮肤护理与检查",
        category: TaskCategory::BasicCare,
        frequency: "每日1次全身检查",
        description: "预防压疮、感染",
        steps: &[
            "每次翻身时顺便检查全身皮肤",
            "重点检查骨突处：骶尾、脚后跟、髋部、肩胛骨、肘部",
            "检查尿管、鼻饲管周围皮肤",
            "检查贴胶布处",
        ],
        check_points: &["无新发红斑", "无皮肤破损", "无肿胀", "记录发现的问题"],
        alert_note: None,
        required_data: None,
        requires_photo: true,
    },
    CareTask {
        id: "vital_signs",
        name: "生命体征测量",
        category: TaskCategory::Observation,
        frequency: "每日4次，固定时间",
        description: "监测体温、血压、心率、血氧饱和度",
        steps: &[
            "测量体温（正常36.0-37.5℃）",
            "测量血压（正常收缩压<120mmHg）",
            "测量心率（正常60-100次/分）",
            "测量血氧饱和度（正常95-100%）",
        ],
        check_points: &["体温在正常范围", "血压在正常范围", "心率在正常范围", "血氧在正常范围"],
        alert_note: Some("体温>38℃或<36℃、血压>140或<90、心率>100或<50、血氧<95%时立即报告！"),
        required_data: Some(RequiredData::Vitals),
        requires_photo: false,
    },
    CareTask {
        id: "intake_output",
        name: "出入量记录",
        category: TaskCategory::Observation,
        frequency: "每24小时总结",
        description: "监测液体平衡，预防脱水或水肿",
        steps: &[
            "记录入量：鼻饲量、饮水量、输液量",
            "记录出量：用带刻度尿壶测量尿量",
            "记录大便次数及性状",
        ],
        check_points: &["记录24小时总入量", "记录24小时总尿量", "记录大便情况"],
        alert_note: Some("24小时尿量<800ml或>2500ml、连续6小时无尿时立即报告！"),
        required_data: Some(RequiredData::IntakeOutput),
        requires_photo: false,
    },
    CareTask {
        id: "neuro_observation",
        name: "神经系统观察",
        category: TaskCategory::Observation,
        frequency: "每次接触时观察",
        description: "监测意识恢复状况",
        steps: &[
            "观察意识：比昨天更清醒还是更嗜睡？",
            "观察睁眼：能否自主睁眼？持续时间？",
            "测试呼唤反应：叫名字时有无反应？",
            "观察肢体活动：有无自主活动？",
            "观察疼痛表现：有无痛苦表情？",
        ],
        check_points: &[
            "记录意识状态变化",
            "记录睁眼情况",
            "记录对呼唤的反应",
            "记录肢体活动",
            "记录疼痛表现",
        ],
        alert_note: None,
        required_data: Some(RequiredData::ObservationText),
        requires_photo: false,
    },
    CareTask {
        id: "abdomen_limb_check",
        name: "腹部/肢体观察",
        category: TaskCategory::Observation,
        frequency: "腹部每小时，肢体每日1次",
        description: "监测动脉瘤和血栓风险",
        steps: &[
            "腹部：看有无膨隆、搏动性包块",
            "腹部：问肚子疼不疼",
            "腹部：察有无面色苍白、出冷汗",
            "肢体：看双下肢有无不对称肿胀",
            "肢体：问腿疼不疼",
            "肢体：察有无突发胸痛、呼吸困难",
        ],
        check_points: &["腹部无异常膨隆", "双下肢对称无肿胀", "无突发疼痛表现", "记录异常发现"],
        alert_note: Some("出现上述任何异常变化，立即呼叫护士/医生！"),
        required_data: None,
        requires_photo: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_registry_has_ten_unique_tasks() {
        let registry = TaskRegistry::standard();
        assert_eq!(registry.len(), 10);

        let ids: HashSet<_> = registry.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_order_is_stable() {
        let ids: Vec<_> = TaskRegistry::standard().tasks().iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec![
                "turn_position",
                "oral_care",
                "nasal_feeding",
                "perineal_care",
                "passive_exercise",
                "skin_check",
                "vital_signs",
                "intake_output",
                "neuro_observation",
                "abdomen_limb_check",
            ]
        );
    }

    #[test]
    fn test_find() {
        let registry = TaskRegistry::standard();
        let task = registry.find("vital_signs").unwrap();
        assert_eq!(task.name, "生命体征测量");
        assert_eq!(task.required_data, Some(RequiredData::Vitals));
        assert!(task.alert_note.is_some());
        assert!(registry.find("unknown").is_none());
    }

    #[test]
    fn test_by_category() {
        let registry = TaskRegistry::standard();
        let rehab: Vec<_> = registry
            .by_category(TaskCategory::Rehabilitation)
            .map(|t| t.id)
            .collect();
        assert_eq!(rehab, vec!["passive_exercise"]);
        assert_eq!(registry.by_category(TaskCategory::Observation).count(), 4);
        assert_eq!(registry.by_category(TaskCategory::BasicCare).count(), 5);
    }

    #[test]
    fn test_serialized_task_carries_no_presentation_fields() {
        let registry = TaskRegistry::standard();
        let value = serde_json::to_value(registry.find("oral_care").unwrap()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object["id"], "oral_care");
        assert!(!object.contains_key("icon"));
    }

    #[test]
    fn test_photo_tasks() {
        let photo: Vec<_> = TaskRegistry::standard()
            .tasks()
            .iter()
            .filter(|t| t.requires_photo)
            .map(|t| t.id)
            .collect();
        assert_eq!(photo, vec!["turn_position", "skin_check"]);
    }
}
