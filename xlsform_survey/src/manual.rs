/*!

This is the long-form manual for `xlsform_survey` and `xlsform2survey`.

## Worksheets

A form is a workbook with up to three worksheets. They are recognized by their
name, which must contain one of the words below (case sensitive):

* `survey` (required) the groups and questions, one per row
* `choices` (optional) the answers of the selection questions
* `settings` (optional) the metadata of the form, on the first content row

Blank rows are ignored everywhere. The first remaining row of each worksheet is
its header row. Column titles are matched exactly, after trimming.

### `survey`

Required columns: `type`, `name`, `relevant`.

Optional columns: `label`, `hint`, `constraint_message` (possibly in several
languages, see below), `required`, `notes`, `appearance`, `calculation`,
`default`, `constraint`, `read_only`, `agegroup` (or `age_group`, `age group`)
and `choice_filter`.

Groups are opened with `begin_group` (or `begin_repeat`) and closed with
`end_group` (or `end_repeat`). A group that is never closed is closed at the end
of the worksheet, and an `end_group` without an open group is ignored. Both
cases are reported as warnings.

### `choices`

Required columns: `list_name` (or `list name`), `name`, `label`.
Any other column is a choice filter: its title and value are attached to the
answer when the cell is not blank.

### `settings`

`form_title`, `form_id`, `version`, `default_language`, `style`,
`instance_name`, `public_key`, `submission_url`. All optional.

## Languages

Columns titled `label::English`, `label::Français`, ... form a cluster, one
column per language. A single column titled `label` is called "Only Language".
Languages that do not start with a letter are renamed: `Language 01`,
`Language 02`, ... if none of them starts with a letter, otherwise they get an
`L ` prefix.

Relevance expressions are translated in the languages that both the survey
labels and the choice labels have in common, unless configured otherwise.

## Question types

The type is the first word(s) of the `type` cell. The select types are followed
by the name of a list of the `choices` worksheet:

* `select_one yes_no`, optionally followed by `or_other`
* `select_multiple colors`, optionally followed by `or_other`
* `rank fruits`
* `select_one_from_file towns.csv`

An unknown type is kept as `unknown`, with a warning.

## Relevance

The `relevant` column holds an expression such as
`selected(${smoker}, 'yes') and ${age} >= 18`. It is rendered as a sentence,
using the labels of the questions and answers it refers to. In English,
operators are written out ("was answered with", "is greater than"); in other
languages symbols are used. A reference to a question or answer that does not
exist is shown as "not found" but does not stop the conversion.

## Command line

```bash
xlsform2survey --input form.xlsx --out survey.json
```

Use `--reference expected.json` to compare the output with a previous
conversion, `--languages all` to translate relevance expressions in every
language, and `--verbose` to see the details of the conversion.

*/
