use crate::eligibility::UniversityMatch;

const COMPETITIVE_APS: u32 = 35;

pub(crate) fn generate_insights(university_match: &UniversityMatch) -> Vec<String> {
    let mut insights = Vec::with_capacity(2);

    let average = university_match.average_mark;
    let academic = if average >= 80.0 {
        "Excellent academic performance! You qualify for top-tier universities and competitive programs."
    } else if average >= 70.0 {
        "Strong academic performance opens doors to most university programs."
    } else if average >= 60.0 {
        "Good academic foundation. Consider strengthening key subjects for better opportunities."
    } else {
        "Focus on improving academic performance. Consider bridging courses or alternative pathways."
    };
    insights.push(academic.to_string());

    let aps = if university_match.aps_score >= COMPETITIVE_APS {
        "Your APS score qualifies you for most university programs."
    } else {
        "Consider improving your APS score through supplementary exams if needed."
    };
    insights.push(aps.to_string());

    insights
}
