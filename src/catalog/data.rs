//! Static reference table of common Chinese characters.
//!
//! Covers the high-frequency characters the classifier's first class indices
//! map to, plus the most common characters for direct lookup.

use super::CharacterRecord;

/// Characters for the lowest class indices of the reference model.
///
/// Index 0..10 of the prediction vector resolves to these, in this order.
pub(super) const CLASS_CHARACTERS: [char; 10] =
    ['人', '大', '小', '山', '水', '木', '火', '土', '日', '月'];

pub(super) const COMMON_CHARACTERS: &[CharacterRecord] = &[
    CharacterRecord {
        character: '人',
        pinyin: "rén",
        meaning: "person",
        stroke_count: 2,
        examples: &["中国人", "好人"],
        radical: "人",
        etymology: Some("Originally depicted a person seen from the side, walking."),
        pronunciation_tips: Some("Say \"ren\" with a rising tone."),
        mnemonics: Some("Looks like a person in profile, mid-stride."),
    },
    CharacterRecord {
        character: '大',
        pinyin: "dà",
        meaning: "big",
        stroke_count: 3,
        examples: &["大学", "大人"],
        radical: "大",
        etymology: Some("A person with arms stretched wide, meaning \"big\"."),
        pronunciation_tips: Some("Say \"da\" with a falling tone."),
        mnemonics: Some("A person spreading their arms to show how big something is."),
    },
    CharacterRecord {
        character: '小',
        pinyin: "xiǎo",
        meaning: "small",
        stroke_count: 3,
        examples: &["小学", "小人"],
        radical: "小",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '山',
        pinyin: "shān",
        meaning: "mountain",
        stroke_count: 3,
        examples: &["高山", "山水"],
        radical: "山",
        etymology: Some("A pictogram of three mountain peaks."),
        pronunciation_tips: None,
        mnemonics: Some("Three peaks rising from a ridge line."),
    },
    CharacterRecord {
        character: '水',
        pinyin: "shuǐ",
        meaning: "water",
        stroke_count: 4,
        examples: &["喝水", "水果"],
        radical: "水",
        etymology: Some("A pictogram of flowing water."),
        pronunciation_tips: Some("Say \"shway\" with a falling then rising tone."),
        mnemonics: Some("Picture droplets running down the strokes."),
    },
    CharacterRecord {
        character: '木',
        pinyin: "mù",
        meaning: "wood, tree",
        stroke_count: 4,
        examples: &["木头", "树木"],
        radical: "木",
        etymology: Some("A tree with branches above and roots below."),
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '火',
        pinyin: "huǒ",
        meaning: "fire",
        stroke_count: 4,
        examples: &["火车", "大火"],
        radical: "火",
        etymology: Some("A pictogram of rising flames."),
        pronunciation_tips: Some("Say \"hwo\" with a falling then rising tone."),
        mnemonics: Some("The strokes are flames licking upward, like a campfire."),
    },
    CharacterRecord {
        character: '土',
        pinyin: "tǔ",
        meaning: "earth, soil",
        stroke_count: 3,
        examples: &["土地", "土豆"],
        radical: "土",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '日',
        pinyin: "rì",
        meaning: "sun, day",
        stroke_count: 4,
        examples: &["日本", "生日"],
        radical: "日",
        etymology: Some("Originally a circle with a dot at its center, the sun."),
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '月',
        pinyin: "yuè",
        meaning: "moon, month",
        stroke_count: 4,
        examples: &["月亮", "一月"],
        radical: "月",
        etymology: Some("A crescent moon turned on its side."),
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '的',
        pinyin: "de",
        meaning: "possessive particle",
        stroke_count: 8,
        examples: &["我的书", "他的朋友"],
        radical: "白",
        etymology: None,
        pronunciation_tips: Some("Neutral tone, short and unstressed."),
        mnemonics: None,
    },
    CharacterRecord {
        character: '一',
        pinyin: "yī",
        meaning: "one",
        stroke_count: 1,
        examples: &["一个人", "第一"],
        radical: "一",
        etymology: Some("A single horizontal stroke, the number one."),
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '是',
        pinyin: "shì",
        meaning: "to be",
        stroke_count: 9,
        examples: &["我是学生", "这是书"],
        radical: "日",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '不',
        pinyin: "bù",
        meaning: "no, not",
        stroke_count: 4,
        examples: &["不好", "不是"],
        radical: "一",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '了',
        pinyin: "le",
        meaning: "completed-action particle",
        stroke_count: 2,
        examples: &["吃了饭", "看了书"],
        radical: "了",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '在',
        pinyin: "zài",
        meaning: "at, in, located at",
        stroke_count: 6,
        examples: &["在家", "在学习"],
        radical: "土",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '我',
        pinyin: "wǒ",
        meaning: "I, me",
        stroke_count: 7,
        examples: &["我是", "我的"],
        radical: "戈",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '有',
        pinyin: "yǒu",
        meaning: "to have",
        stroke_count: 6,
        examples: &["有钱", "有时间"],
        radical: "月",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '他',
        pinyin: "tā",
        meaning: "he, him",
        stroke_count: 5,
        examples: &["他是", "他的"],
        radical: "人",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '中',
        pinyin: "zhōng",
        meaning: "middle, center",
        stroke_count: 4,
        examples: &["中国", "中间"],
        radical: "丨",
        etymology: Some("A vertical line piercing the center of a box."),
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '上',
        pinyin: "shàng",
        meaning: "above, to go up",
        stroke_count: 3,
        examples: &["上面", "上课"],
        radical: "一",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '下',
        pinyin: "xià",
        meaning: "below, to go down",
        stroke_count: 3,
        examples: &["下面", "下课"],
        radical: "一",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '金',
        pinyin: "jīn",
        meaning: "gold, metal",
        stroke_count: 8,
        examples: &["金子", "金色"],
        radical: "金",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '口',
        pinyin: "kǒu",
        meaning: "mouth",
        stroke_count: 3,
        examples: &["人口", "门口"],
        radical: "口",
        etymology: Some("A pictogram of an open mouth."),
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '手',
        pinyin: "shǒu",
        meaning: "hand",
        stroke_count: 4,
        examples: &["手机", "洗手"],
        radical: "手",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '心',
        pinyin: "xīn",
        meaning: "heart",
        stroke_count: 4,
        examples: &["小心", "开心"],
        radical: "心",
        etymology: Some("A stylized drawing of the heart organ."),
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '目',
        pinyin: "mù",
        meaning: "eye",
        stroke_count: 5,
        examples: &["目光", "题目"],
        radical: "目",
        etymology: Some("An eye turned upright, the pupil between two lids."),
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '耳',
        pinyin: "ěr",
        meaning: "ear",
        stroke_count: 6,
        examples: &["耳朵", "耳机"],
        radical: "耳",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '二',
        pinyin: "èr",
        meaning: "two",
        stroke_count: 2,
        examples: &["二月", "第二"],
        radical: "二",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '三',
        pinyin: "sān",
        meaning: "three",
        stroke_count: 3,
        examples: &["三个", "第三"],
        radical: "一",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '四',
        pinyin: "sì",
        meaning: "four",
        stroke_count: 5,
        examples: &["四月", "四个"],
        radical: "囗",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '五',
        pinyin: "wǔ",
        meaning: "five",
        stroke_count: 4,
        examples: &["五月", "五次"],
        radical: "二",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
    CharacterRecord {
        character: '六',
        pinyin: "liù",
        meaning: "six",
        stroke_count: 4,
        examples: &["六月", "六个"],
        radical: "八",
        etymology: None,
        pronunciation_tips: None,
        mnemonics: None,
    },
];

/// Record returned for class indices outside the reference table.
pub(super) const FALLBACK_RECORD: CharacterRecord = CharacterRecord {
    character: '□',
    pinyin: "",
    meaning: "unknown character",
    stroke_count: 0,
    examples: &[],
    radical: "",
    etymology: None,
    pronunciation_tips: None,
    mnemonics: None,
};
