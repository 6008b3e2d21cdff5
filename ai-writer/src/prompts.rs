use job_scraper::JobRecord;

const SYSTEM_PROMPT: &str = r#"You are a resume and cover letter customizer.
You take job postings and create application materials tailored to them.
You will be given a job description, information about the hiring company and the applicant's own documents.
Align the resume and cover letter with the requirements of the position and the culture of the company."#;

pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Everything the record knows about the hiring company
pub fn company_information(record: &JobRecord) -> String {
    format!(
        "Company: {}\nPosition: {}\nCompensation: {}\nPosting: {}",
        record.company(),
        record.title(),
        record.compensation_note(),
        record.posting_url()
    )
}

pub fn resume_prompt(job_description: &str, company_information: &str, resume: &str) -> String {
    format!(
        r#"You are an expert resume writer. Write a resume tailored to a specific job posting,
based on the applicant's current resume and the posting details.

1. Review the job description and company information:
<job_description>
{job_description}
</job_description>

<company_information>
{company_information}
</company_information>

2. Review the applicant's resume:
<applicant_resume>
{resume}
</applicant_resume>

3. Identify the key requirements of the position and the skills the posting emphasizes.

4. Find the applicant's experience and achievements that match those requirements,
including management and leadership experience.

5. Write the tailored resume:
- Clear, professional format, keeping the formatting style of the original resume
- A 2-3 sentence summary aligned with the position
- Work experience in reverse chronological order, relevant roles first
- Bullet points with quantified results where possible
- Skills, education and certifications that match the requirements
- At most 2 pages

Do not add experience or qualifications that are not present in the original resume.
Write the complete resume within <resume> tags."#
    )
}

pub fn cover_letter_prompt(
    job_description: &str,
    company_information: &str,
    resume: &str,
    previous_cover_letter: &str,
) -> String {
    format!(
        r#"You are an expert cover letter writer. Write a cover letter tailored to a specific job posting,
based on the applicant's resume, a previous cover letter and the posting details.

1. Review the job description and company information:
<job_description>
{job_description}
</job_description>

<company_information>
{company_information}
</company_information>

2. Review the applicant's resume and previous cover letter:
<applicant_resume>
{resume}
</applicant_resume>

<previous_cover_letter>
{previous_cover_letter}
</previous_cover_letter>

3. Identify the key requirements of the position and the values of the company.

4. Match the applicant's experience to those requirements and keep the voice and tone
of the previous cover letter.

5. Write the cover letter, fitting on a single page:
- An introduction paragraph addressed to the appropriate person or department
- Two body paragraphs with concrete examples from the applicant's experience
- A closing paragraph
- Professional yet personable tone, proofread for grammar and spelling

Write the complete cover letter within <cover_letter> tags."#
    )
}

/// Returns the content between `<tag>` and `</tag>`, or the whole trimmed text when the model
/// didn't wrap its answer.
pub fn unwrap_tagged<'a>(text: &'a str, tag: &str) -> &'a str {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    text.split_once(&open)
        .and_then(|(_, rest)| rest.split_once(&close))
        .map(|(inner, _)| inner)
        .unwrap_or(text)
        .trim()
}
