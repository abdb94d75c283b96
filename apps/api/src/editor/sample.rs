use crate::editor::store::IdGenerator;
use crate::models::resume::{
    Achievement, Certification, Education, Experience, PersonalInfo, ResumeData, Skill,
};

/// Built-in demo resume behind the editor's "load sample data" action.
pub fn sample_resume(ids: &IdGenerator) -> ResumeData {
    let skill = |name: &str, category: &str| Skill {
        id: ids.next_id(),
        name: name.to_string(),
        category: category.to_string(),
    };

    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Alex Johnson".to_string(),
            email: "alex.johnson@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            linkedin: "linkedin.com/in/alexjohnson".to_string(),
            address: "San Francisco, CA".to_string(),
            github: "github.com/alexjohnson".to_string(),
            website: "alexjohnson.dev".to_string(),
        },
        summary: "Full stack developer with 6+ years of experience building scalable web \
                  applications. Comfortable across the stack, from React front-ends to \
                  distributed back-end services, with a track record of mentoring engineers \
                  and shipping products used by millions."
            .to_string(),
        education: vec![Education {
            id: ids.next_id(),
            degree: "Bachelor of Science in Computer Science".to_string(),
            institution: "University of California, Berkeley".to_string(),
            location: "Berkeley, CA".to_string(),
            start_date: "2014-09".to_string(),
            end_date: "2018-05".to_string(),
            gpa: "3.8".to_string(),
            description: "Focus on distributed systems and human-computer interaction."
                .to_string(),
        }],
        experience: vec![
            Experience {
                id: ids.next_id(),
                position: "Senior Full Stack Developer".to_string(),
                company: "TechCorp Solutions".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "2021-03".to_string(),
                end_date: String::new(),
                current: true,
                description: "Lead developer for the customer analytics platform.".to_string(),
                responsibilities: vec![
                    "Led development of a microservices architecture serving 2M+ users"
                        .to_string(),
                    "Mentored a team of 5 junior developers".to_string(),
                    "Reduced page load times by 40% through code splitting and caching"
                        .to_string(),
                ],
            },
            Experience {
                id: ids.next_id(),
                position: "Software Engineer".to_string(),
                company: "StartupXYZ".to_string(),
                location: "Remote".to_string(),
                start_date: "2018-06".to_string(),
                end_date: "2021-02".to_string(),
                current: false,
                description: String::new(),
                responsibilities: vec![
                    "Built the company's first customer-facing dashboard in React".to_string(),
                    "Designed REST APIs handling 10k requests per minute".to_string(),
                ],
            },
        ],
        skills: vec![
            skill("JavaScript", "Programming Languages"),
            skill("TypeScript", "Programming Languages"),
            skill("Python", "Programming Languages"),
            skill("React", "Frameworks & Libraries"),
            skill("Node.js", "Frameworks & Libraries"),
            skill("PostgreSQL", "Databases"),
            skill("MongoDB", "Databases"),
            skill("AWS", "Cloud & DevOps"),
            skill("Docker", "Cloud & DevOps"),
            skill("Team Leadership", "Soft Skills"),
        ],
        certifications: vec![Certification {
            id: ids.next_id(),
            name: "AWS Certified Solutions Architect - Associate".to_string(),
            issuer: "Amazon Web Services".to_string(),
            date: "2022-08".to_string(),
            credential_id: "AWS-SAA-123456".to_string(),
            url: String::new(),
        }],
        achievements: vec![Achievement {
            id: ids.next_id(),
            title: "Hackathon Winner".to_string(),
            description: "First place at TechCorp's annual hackathon for an accessibility \
                          auditing tool."
                .to_string(),
            date: "2022-11".to_string(),
        }],
    }
}
